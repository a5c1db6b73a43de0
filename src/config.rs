//! Configuration for the completion endpoint and model sampling

use std::path::Path;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default chat-completion base URL (Groq, OpenAI-compatible)
pub const DEFAULT_API_BASE: &str
  = "https://api.groq.com/openai/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "JURIDICO_API_KEY";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "JURIDICO_API_BASE";

/// Credential and endpoint, built once at startup and never mutated
#[derive(Clone, Serialize, Deserialize)]
pub struct EngineConfig
{   /// Bearer credential for the completion API
    pub api_key: String
  , /// API base URL, without the `/chat/completions` suffix
    #[serde(default = "default_api_base")]
    pub api_base: String
}

fn default_api_base() -> String
{   DEFAULT_API_BASE.to_string()
}

impl std::fmt::Debug for EngineConfig
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("EngineConfig")
          .field("api_key", &"<redacted>")
          .field("api_base", &self.api_base)
          .finish()
    }
}

impl EngineConfig
{   /// Config pointing at the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self
    {   EngineConfig
        {   api_key: api_key.into()
          , api_base: default_api_base()
        }
    }

    /// Replace the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self
    {   self.api_base = api_base.into();
        self
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String
    {   format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    /// Read the credential (and optional base URL) from the environment
    pub fn from_env() -> Result<Self, Error>
    {   let api_key = std::env::var(API_KEY_ENV)
          .ok()
          .filter(|k| !k.trim().is_empty())
          .ok_or_else(|| {
            error!("{} not set", API_KEY_ENV);
            Error::InvalidConfiguration(
              format!("environment variable {} not set", API_KEY_ENV)
            )
          })?;
        let config = match std::env::var(API_BASE_ENV)
        {   Ok(base) if !base.trim().is_empty() => {
              EngineConfig::new(api_key).with_api_base(base)
            }
          , _ => EngineConfig::new(api_key)
        };
        debug!("Loaded engine config from env: {:?}", config);
        config.validate()?;
        Ok(config)
    }

    /// Load the config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
          error!("Failed to read {}: {}", path.display(), e);
          Error::InvalidConfiguration(
            format!("cannot read {}: {}", path.display(), e)
          )
        })?;
        let config: EngineConfig = serde_json::from_str(&raw)
          .map_err(|e| {
            error!("Failed to parse {}: {}", path.display(), e);
            Error::InvalidConfiguration(
              format!("cannot parse {}: {}", path.display(), e)
            )
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a blank credential or a non-http base URL
    pub fn validate(&self) -> Result<(), Error>
    {   if self.api_key.trim().is_empty()
        {   return Err(Error::InvalidConfiguration(
              "api_key is empty".to_string()
            ));
        }
        if !(self.api_base.starts_with("http://")
          || self.api_base.starts_with("https://"))
        {   return Err(Error::InvalidConfiguration(
              format!("api_base must be an http(s) URL: {}", self.api_base)
            ));
        }
        Ok(())
    }
}

/// Sampling and deadline options for one completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig
{   /// Model identifier
    pub model: String
  , /// Randomness in [0, 1]; lower is more formal
    pub temperature: f32
  , /// Output token cap
    pub max_tokens: u32
  , /// Nucleus-sampling cutoff in (0, 1]
    pub top_p: f32
  , /// Request deadline in seconds
    pub timeout_seconds: u64
}

impl Default for ModelConfig
{   fn default() -> Self
    {   ModelConfig
        {   model: DEFAULT_MODEL.to_string()
          , temperature: 0.3
          , max_tokens: 4000
          , top_p: 0.9
          , timeout_seconds: 30
        }
    }
}

impl ModelConfig
{   /// Check every option is inside its documented range
    pub fn validate(&self) -> Result<(), Error>
    {   if self.model.trim().is_empty()
        {   return Err(Error::InvalidConfiguration(
              "model is empty".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature)
        {   return Err(Error::InvalidConfiguration(
              format!("temperature {} outside [0, 1]", self.temperature)
            ));
        }
        if self.max_tokens == 0
        {   return Err(Error::InvalidConfiguration(
              "max_tokens must be positive".to_string()
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0)
        {   return Err(Error::InvalidConfiguration(
              format!("top_p {} outside (0, 1]", self.top_p)
            ));
        }
        if self.timeout_seconds == 0
        {   return Err(Error::InvalidConfiguration(
              "timeout_seconds must be positive".to_string()
            ));
        }
        Ok(())
    }

    /// Request deadline as a `Duration`
    pub fn timeout(&self) -> std::time::Duration
    {   std::time::Duration::from_secs(self.timeout_seconds)
    }
}
