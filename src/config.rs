//! Configuration for the query widget

use serde::{Deserialize, Serialize};

/// Base URL of a locally running analysis service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig
{   /// Analysis service base URL
    pub base_url: String
  , /// Path of the query endpoint
    pub query_path: String
  , /// Path probed for liveness
    pub health_path: String
  , /// Enable detailed logging
    pub verbose: bool
}

impl Default for WidgetConfig
{   fn default() -> Self
    {   WidgetConfig
        {   base_url: DEFAULT_BASE_URL.to_string()
          , query_path: "/query".to_string()
          , health_path: "/docs".to_string()
          , verbose: false
        }
    }
}

impl WidgetConfig
{   /// Config pointing at `base_url` with default paths
    pub fn with_base_url(base_url: impl Into<String>) -> Self
    {   WidgetConfig
        {   base_url: base_url.into()
          , ..WidgetConfig::default()
        }
    }

    /// Parse a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str)
      -> Result<Self, crate::error::Error>
    {   serde_json::from_str(json).map_err(|e| {
          crate::error::Error::InvalidConfiguration(e.to_string())
        })
    }

    /// Reject configs the widget cannot send requests with
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let base = self.base_url.trim();
        if base.is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "base_url is empty".to_string()
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://")
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("base_url must be http(s): {}", base)
            ));
        }
        Ok(())
    }

    pub fn query_url(&self) -> String
    {   join_url(&self.base_url, &self.query_path)
    }

    pub fn health_url(&self) -> String
    {   join_url(&self.base_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> String
{   format!(
      "{}/{}",
      base.trim().trim_end_matches('/'),
      path.trim().trim_start_matches('/')
    )
}
