//! HTTP calls to the analysis service

use log::{debug, error, trace, warn};

/// Analysis service client
#[derive(Debug, Clone)]
pub struct ServiceClient
{   http_client: reqwest::Client
  , query_url: String
  , health_url: String
}

impl ServiceClient
{   pub fn new(config: &crate::config::WidgetConfig) -> Self
    {   debug!("Creating ServiceClient for {}", config.base_url);
        ServiceClient
        {   http_client: reqwest::Client::new()
          , query_url: config.query_url()
          , health_url: config.health_url()
        }
    }

    pub fn query_url(&self) -> &str
    {   &self.query_url
    }

    pub fn health_url(&self) -> &str
    {   &self.health_url
    }

    /// POST a query and resolve the reply to answer text
    pub async fn post_query(
      &self
    , request: &crate::request::QueryRequest
    ) -> Result<String, crate::error::Error>
    {   debug!("Making request to: {}", self.query_url);
        trace!("Query request: {:?}", request);

        let response = self.http_client
          .post(&self.query_url)
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        debug!("Response status: {}", status);
        trace!("Response headers: {:?}", response.headers());

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Error response: {}", error_text);
            return Err(crate::error::Error::HttpStatus
            {   status: status.as_u16()
              , body: error_text
            });
        }

        let query_response: crate::request::QueryResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        debug!("Response data: {:?}", query_response);
        query_response.into_answer()
    }

    /// GET the health path; only the status is inspected
    pub async fn probe_health(&self) -> crate::ConnectionStatus
    {   trace!("Probing {}", self.health_url);
        match self.http_client.get(&self.health_url).send().await
        {   Ok(response) if response.status().is_success() => {
              debug!("API is available");
              crate::ConnectionStatus::Connected
            }
          , Ok(response) => {
              warn!(
                "API might not be running (status {})",
                response.status()
              );
              crate::ConnectionStatus::Error(
                crate::HealthFailure::ApiError
              )
            }
          , Err(e) => {
              warn!("Cannot connect to API: {}", e);
              crate::ConnectionStatus::Error(
                crate::HealthFailure::ConnectionFailed
              )
            }
        }
    }
}
