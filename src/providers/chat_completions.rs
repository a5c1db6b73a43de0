use std::future::Future;

use log::{debug, error, trace};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ModelConfig};
use crate::error::Error;
use crate::TransportOutcome;

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: &str) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.to_string()
        }
    }

    pub fn user(content: &str) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: u32
  , pub top_p: f32
}

impl ChatCompletionRequest
{   /// Two-message request: system context, then user prompt
    pub fn new(
      system_context: &str
    , user_prompt: &str
    , model_config: &ModelConfig
    ) -> Self
    {   ChatCompletionRequest
        {   model: model_config.model.clone()
          , messages: vec![
              ChatMessage::system(system_context)
            , ChatMessage::user(user_prompt)
            ]
          , temperature: model_config.temperature
          , max_tokens: model_config.max_tokens
          , top_p: model_config.top_p
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ResponseMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub content: Option<String>
}

impl ChatCompletionResponse
{   /// Content of the first choice, if present and non-empty
    pub fn first_content(self) -> Option<String>
    {   self.choices
          .into_iter()
          .next()
          .and_then(|c| c.message.content)
          .filter(|text| !text.trim().is_empty())
    }
}

// ===== Transport seam =====

/// One chat-completion exchange.
/// Implementations make exactly one request per call and never retry.
pub trait CompletionTransport: Send + Sync
{   fn complete(
      &self
    , system_context: &str
    , user_prompt: &str
    , model_config: &ModelConfig
    ) -> impl Future<Output = TransportOutcome> + Send;
}

// ===== HTTP client =====

/// OpenAI-compatible chat-completion client.
/// Holds only the immutable credential/endpoint and a pooled connection set.
#[derive(Debug, Clone)]
pub struct CompletionClient
{   config: EngineConfig
  , http_client: reqwest::Client
}

impl CompletionClient
{   pub fn new(config: EngineConfig) -> Self
    {   debug!("Creating CompletionClient for {}", config.api_base);
        CompletionClient
        {   config
          , http_client: reqwest::Client::new()
        }
    }

    pub fn config(&self) -> &EngineConfig
    {   &self.config
    }

    async fn send(
      &self
    , request: &ChatCompletionRequest
    , model_config: &ModelConfig
    ) -> TransportOutcome
    {   let url = self.config.completions_url();
        trace!("Completion request to {}: {:?}", url, request);

        let response = self.http_client
          .post(&url)
          .header("Authorization", format!("Bearer {}", self.config.api_key))
          .header("Content-Type", "application/json")
          .timeout(model_config.timeout())
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::from(e)
          })?;

        let status = response.status();
        trace!("Completion response status: {}", status);

        let body = response.text().await.map_err(|e| {
          error!("Failed reading response body: {}", e);
          Error::from(e)
        })?;

        if status != StatusCode::OK
        {   let api_error = Error::api(status.as_u16(), &body);
            error!("Completion API error: {}", api_error.detail());
            return Err(api_error);
        }

        let chat_response: ChatCompletionResponse
          = serde_json::from_str(&body).map_err(|e| {
            error!("Parse error: {}", e);
            Error::MalformedBody
          })?;

        chat_response.first_content().ok_or_else(|| {
          error!("No completion content in response");
          Error::MalformedBody
        })
    }
}

impl CompletionTransport for CompletionClient
{   async fn complete(
      &self
    , system_context: &str
    , user_prompt: &str
    , model_config: &ModelConfig
    ) -> TransportOutcome
    {   debug!("Sending completion request for model {}", model_config.model);
        let request = ChatCompletionRequest::new(
          system_context,
          user_prompt,
          model_config
        );
        let outcome = self.send(&request, model_config).await;
        match &outcome
        {   Ok(text) => debug!("Completion returned {} bytes", text.len())
          , Err(e) => debug!("Completion failed: {}", e)
        }
        outcome
    }
}
