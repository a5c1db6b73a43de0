//! Case data record handed over by the form layer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One case field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue
{   Text(String)
  , Number(serde_json::Number)
  , Flag(bool)
  , Nested(CaseData)
}

impl FieldValue
{   /// True when the trimmed representation is empty.
    /// A nested map is blank when every leaf in it is blank.
    pub fn is_blank(&self) -> bool
    {   match self
        {   FieldValue::Text(s) => s.trim().is_empty()
          , FieldValue::Number(_) | FieldValue::Flag(_) => false
          , FieldValue::Nested(inner) => {
              inner.values().all(FieldValue::is_blank)
            }
        }
    }
}

impl From<&str> for FieldValue
{   fn from(s: &str) -> Self
    {   FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue
{   fn from(s: String) -> Self
    {   FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue
{   fn from(b: bool) -> Self
    {   FieldValue::Flag(b)
    }
}

impl From<i64> for FieldValue
{   fn from(n: i64) -> Self
    {   FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue
{   fn from(n: u64) -> Self
    {   FieldValue::Number(n.into())
    }
}

impl From<CaseData> for FieldValue
{   fn from(c: CaseData) -> Self
    {   FieldValue::Nested(c)
    }
}

/// Nested map holding party qualification in the form payload
pub const PARTIES_FIELD: &str = "partes";

/// Field name to value mapping, kept in lexicographic key order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseData
{   fields: BTreeMap<String, FieldValue>
}

impl CaseData
{   pub fn new() -> Self
    {   CaseData::default()
    }

    /// Builder-style insert
    pub fn with(
      mut self
    , name: impl Into<String>
    , value: impl Into<FieldValue>
    ) -> Self
    {   self.insert(name, value);
        self
    }

    pub fn insert(
      &mut self
    , name: impl Into<String>
    , value: impl Into<FieldValue>
    ) -> Option<FieldValue>
    {   self.fields.insert(name.into(), value.into())
    }

    /// Insert a float; NaN and infinities are dropped
    pub fn with_number(mut self, name: impl Into<String>, n: f64) -> Self
    {   if let Some(num) = serde_json::Number::from_f64(n)
        {   self.fields.insert(name.into(), FieldValue::Number(num));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue>
    {   self.fields.get(name)
    }

    /// Top-level field, falling back to the `partes` map the form
    /// uses for party qualification (`partes.autor`, `partes.reu`, ...)
    pub fn lookup(&self, name: &str) -> Option<&FieldValue>
    {   let top = self.get(name).filter(|v| !v.is_blank());
        if top.is_some()
        {   return top;
        }
        match self.get(PARTIES_FIELD)
        {   Some(FieldValue::Nested(partes)) => {
              partes.get(name).or_else(|| self.get(name))
            }
          , _ => self.get(name)
        }
    }

    /// True when `name` is absent or blank, both at top level and
    /// under `partes`
    pub fn is_missing(&self, name: &str) -> bool
    {   self.lookup(name).map_or(true, FieldValue::is_blank)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)>
    {   self.fields.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue>
    {   self.fields.values()
    }

    pub fn len(&self) -> usize
    {   self.fields.len()
    }

    pub fn is_empty(&self) -> bool
    {   self.fields.is_empty()
    }

    /// Parse the JSON object produced by the form layer
    pub fn from_json(raw: &str) -> Result<Self, crate::error::Error>
    {   serde_json::from_str(raw).map_err(|e| {
          log::error!("Case data parse error: {}", e);
          crate::error::Error::InvalidConfiguration(
            format!("case data is not a valid object: {}", e)
          )
        })
    }
}

impl<K, V> FromIterator<(K, V)> for CaseData
where
  K: Into<String>,
  V: Into<FieldValue>,
{   fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self
    {   CaseData
        {   fields: iter
              .into_iter()
              .map(|(k, v)| (k.into(), v.into()))
              .collect()
        }
    }
}
