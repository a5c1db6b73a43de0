//! Required-field checks run before any request is built

use log::debug;

use crate::case_data::CaseData;
use crate::error::Error;
use crate::DocumentType;

/// Result of checking a case against its document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome
{   Ok
  , /// Missing field names, in the document type's declared order
    MissingFields
    {   names: Vec<String>
    }
}

impl ValidationOutcome
{   pub fn is_ok(&self) -> bool
    {   matches!(self, ValidationOutcome::Ok)
    }
}

/// Report which required fields of `document_type` are absent or blank
pub fn validate(
  document_type: DocumentType
, case_data: &CaseData
) -> ValidationOutcome
{   let names: Vec<String> = document_type
      .required_fields()
      .iter()
      .filter(|name| case_data.is_missing(name))
      .map(|name| name.to_string())
      .collect();

    if names.is_empty()
    {   ValidationOutcome::Ok
    } else
    {   debug!(
          "{} case missing fields: {:?}",
          document_type.file_stem(),
          names
        );
        ValidationOutcome::MissingFields { names }
    }
}

/// Case data that passed validation for its document type.
/// Only `check` constructs it.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedCase<'a>
{   document_type: DocumentType
  , case_data: &'a CaseData
}

impl<'a> ValidatedCase<'a>
{   pub fn document_type(&self) -> DocumentType
    {   self.document_type
    }

    pub fn case_data(&self) -> &'a CaseData
    {   self.case_data
    }
}

/// Validate and hand back the typed witness the prompt builder takes
pub fn check(
  document_type: DocumentType
, case_data: &CaseData
) -> Result<ValidatedCase<'_>, Error>
{   match validate(document_type, case_data)
    {   ValidationOutcome::Ok => Ok(ValidatedCase
        {   document_type
          , case_data
        })
      , ValidationOutcome::MissingFields { names } => {
          Err(Error::MissingFields(names))
        }
    }
}
