use std::fmt;

/// Error type for widget operations.
/// Implements Clone for sending through channels.
///
/// `Display` yields the exact text shown in the error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Query was empty after trimming
    EmptyQuery
  , /// Service answered with a non-success HTTP status
    HttpStatus
    {   status: u16
      , body: String
    }
  , /// Service reported an error in the response body
    ServiceError(String)
  , /// Response carried neither an answer nor an error
    NoAnswer
  , /// Transport failure (connection refused, DNS, ...)
    HttpError(String)
  , /// Failed to decode the response body
    ParseError(String)
  , /// Query task died before reporting back
    TaskFailed(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::EmptyQuery => {
              write!(f, "Please enter a query")
            }
          , Error::HttpStatus { status, body } => {
              write!(f,
                "Failed to process query: HTTP error! status: {}, message: {}",
                status,
                body
              )
            }
          , Error::ServiceError(msg) => {
              write!(f, "{}", msg)
            }
          , Error::NoAnswer => {
              write!(f, "No answer received from server")
            }
          , Error::HttpError(msg) => {
              write!(f, "Failed to process query: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Failed to process query: {}", msg)
            }
          , Error::TaskFailed(msg) => {
              write!(f, "Failed to process query: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn http_status_message_carries_code_and_body()
    {   let err = Error::HttpStatus
        {   status: 500
          , body: "Internal Server Error".to_string()
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("Internal Server Error"));
    }

    #[test]
    fn service_error_is_shown_verbatim()
    {   let err = Error::ServiceError("Query required".to_string());
        assert_eq!(err.to_string(), "Query required");
    }

    #[test]
    fn transport_error_is_prefixed()
    {   let err = Error::HttpError("connection refused".into());
        assert_eq!(
          err.to_string(),
          "Failed to process query: connection refused"
        );
    }

    #[test]
    fn task_failure_reads_like_other_query_failures()
    {   let err = Error::TaskFailed("task 7 panicked".into());
        let text = err.to_string();
        assert_eq!(text, "Failed to process query: task 7 panicked");
        assert!(!text.starts_with("Error:"));
    }

    #[test]
    fn plain_strings_become_other()
    {   assert_eq!(Error::from("boom"), Error::Other("boom".into()));
    }
}
