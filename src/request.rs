//! Generation request and result types

use serde::{Deserialize, Serialize};

use crate::case_data::CaseData;
use crate::config::ModelConfig;
use crate::error::ErrorKind;

/// Everything one `generate` call needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Document to draft
    pub document_type: crate::DocumentType
  , /// Facts collected by the form
    pub case_data: CaseData
  , /// Sampling options and deadline
    #[serde(default)]
    pub model_config: ModelConfig
}

impl GenerationRequest
{   pub fn new(
      document_type: crate::DocumentType
    , case_data: CaseData
    ) -> Self
    {   GenerationRequest
        {   document_type
          , case_data
          , model_config: ModelConfig::default()
        }
    }
}

/// What the form layer gets back: drafted text or a displayable failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationResult
{   Success
    {   text: String
    }
  , Failure
    {   kind: ErrorKind
      , detail: String
    }
}

impl GenerationResult
{   pub fn is_success(&self) -> bool
    {   matches!(self, GenerationResult::Success { .. })
    }

    /// Drafted text, if successful
    pub fn text(&self) -> Option<&str>
    {   match self
        {   GenerationResult::Success { text } => Some(text)
          , GenerationResult::Failure { .. } => None
        }
    }

    /// Failure kind, if failed
    pub fn kind(&self) -> Option<ErrorKind>
    {   match self
        {   GenerationResult::Success { .. } => None
          , GenerationResult::Failure { kind, .. } => Some(*kind)
        }
    }
}

impl From<crate::TransportOutcome> for GenerationResult
{   fn from(outcome: crate::TransportOutcome) -> Self
    {   match outcome
        {   Ok(text) => GenerationResult::Success { text }
          , Err(e) => GenerationResult::Failure
            {   kind: e.kind()
              , detail: e.detail()
            }
        }
    }
}
