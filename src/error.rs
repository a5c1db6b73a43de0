use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest upstream error body carried in an `ApiError`, in characters
pub const MAX_ERROR_BODY_CHARS: usize = 500;

/// Coarse failure category shown to the form layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind
{   /// Case data or model configuration rejected before any request
    ValidationError
  , /// Timeout, connection failure or other transport problem
    NetworkError
  , /// Non-200 response or unusable 200 body
    ApiError
}

impl fmt::Display for ErrorKind
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   ErrorKind::ValidationError => write!(f, "ValidationError")
          , ErrorKind::NetworkError => write!(f, "NetworkError")
          , ErrorKind::ApiError => write!(f, "APIError")
        }
    }
}

/// Custom error type for the drafting engine
/// Implements Clone so results can be compared and reused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Required case fields are absent or blank
    MissingFields(Vec<String>)
  , /// Model configuration out of range
    InvalidConfiguration(String)
  , /// Request exceeded its deadline
    Timeout
  , /// Transport-level failure (connect, DNS, TLS, ...)
    HttpError(String)
  , /// API answered with a non-200 status
    ApiError
    {   status: u16
      , body: String
    }
  , /// 200 response without usable completion content
    MalformedBody
}

impl Error
{   /// Build an `ApiError`, bounding the upstream body
    pub fn api(status: u16, body: &str) -> Self
    {   Error::ApiError
        {   status
          , body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS)
        }
    }

    /// Failure category for this error
    pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::MissingFields(_)
          | Error::InvalidConfiguration(_) => ErrorKind::ValidationError
          , Error::Timeout
          | Error::HttpError(_) => ErrorKind::NetworkError
          , Error::ApiError { .. }
          | Error::MalformedBody => ErrorKind::ApiError
        }
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::ApiError { status, .. } => Some(*status)
          , Error::MalformedBody => Some(200)
          , _ => None
        }
    }

    /// User-facing detail string, bounded in length
    pub fn detail(&self) -> String
    {   match self
        {   Error::MissingFields(names) => {
              format!("missing: {}", names.join(", "))
            }
          , Error::InvalidConfiguration(msg) => {
              format!("invalid configuration: {}", msg)
            }
          , Error::Timeout => "timeout".to_string()
          , Error::HttpError(msg) => msg.clone()
          , Error::ApiError { status, body } => {
              format!("HTTP {}: {}", status, body)
            }
          , Error::MalformedBody => "malformed body".to_string()
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingFields(names) => {
              write!(f, "Missing required fields: {}", names.join(", "))
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error {}: {}", status, body)
            }
          , Error::MalformedBody => {
              write!(f, "API response had no completion content")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

/// Cut `s` to at most `max` characters on a char boundary
pub fn truncate_chars(s: &str, max: usize) -> String
{   match s.char_indices().nth(max)
    {   Some((idx, _)) => format!("{}…", &s[..idx])
      , None => s.to_string()
    }
}
