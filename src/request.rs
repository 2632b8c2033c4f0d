//! Wire types for the analysis service

use serde::{Deserialize, Serialize};

/// Body of `POST /query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest
{   /// Trimmed query text
    pub query: String
}

impl QueryRequest
{   /// Build a request from raw input, `None` when nothing is left after trimming
    pub fn from_input(text: &str) -> Option<Self>
    {   let query = text.trim();
        if query.is_empty()
        {   None
        } else
        {   Some(QueryRequest { query: query.to_string() })
        }
    }
}

/// Body returned by `POST /query`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse
{   #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>
}

impl QueryResponse
{   /// Resolve to the answer text.
    /// A non-empty `error` wins over `answer`; empty strings count as absent.
    pub fn into_answer(self) -> Result<String, crate::error::Error>
    {   let QueryResponse { answer, error } = self;
        if let Some(msg) = error.filter(|e| !e.is_empty())
        {   return Err(crate::error::Error::ServiceError(msg));
        }
        answer
          .filter(|a| !a.is_empty())
          .ok_or(crate::error::Error::NoAnswer)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    #[test]
    fn request_serializes_to_query_object()
    {   let req = QueryRequest::from_input(
          "  What is the zoning for 123 Main St?\n"
        ).unwrap();
        assert_eq!(
          serde_json::to_string(&req).unwrap(),
          r#"{"query":"What is the zoning for 123 Main St?"}"#
        );
    }

    #[test]
    fn whitespace_input_builds_no_request()
    {   assert!(QueryRequest::from_input("").is_none());
        assert!(QueryRequest::from_input(" \t\n ").is_none());
    }

    #[test]
    fn error_field_takes_priority()
    {   let resp: QueryResponse = serde_json::from_str(
          r#"{"answer": "ignored", "error": "Processing error: boom"}"#
        ).unwrap();
        assert_eq!(
          resp.into_answer(),
          Err(Error::ServiceError("Processing error: boom".into()))
        );
    }

    #[test]
    fn answer_only_resolves_to_answer()
    {   let resp: QueryResponse
          = serde_json::from_str(r#"{"answer": "Zoned R-1"}"#).unwrap();
        assert_eq!(resp.into_answer(), Ok("Zoned R-1".to_string()));
    }

    #[test]
    fn missing_or_empty_fields_mean_no_answer()
    {   let resp: QueryResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.into_answer(), Err(Error::NoAnswer));

        let resp: QueryResponse = serde_json::from_str(
          r#"{"answer": "", "error": ""}"#
        ).unwrap();
        assert_eq!(resp.into_answer(), Err(Error::NoAnswer));
    }
}
