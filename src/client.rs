use log::{debug, error, info};

use crate::case_data::CaseData;
use crate::config::{EngineConfig, ModelConfig};
use crate::providers::{CompletionClient, CompletionTransport};
use crate::request::{GenerationRequest, GenerationResult};
use crate::retry::{is_retryable, RetryPolicy};
use crate::{validator, DocumentType, TransportOutcome};

/// Entry point for the form layer.
///
/// Holds no mutable state: one engine can be shared (e.g. in an `Arc`)
/// and called concurrently. Each `generate` makes at most one request
/// and surfaces the first failure as-is.
#[derive(Debug, Clone)]
pub struct DraftingEngine<T = CompletionClient>
{   transport: T
  , model_config: ModelConfig
}

impl DraftingEngine<CompletionClient>
{   /// Engine talking to the configured chat-completion endpoint
    pub fn new(config: EngineConfig) -> Self
    {   debug!("Creating DraftingEngine");
        DraftingEngine::with_transport(CompletionClient::new(config))
    }
}

impl<T: CompletionTransport> DraftingEngine<T>
{   /// Engine over any transport (stubs in tests)
    pub fn with_transport(transport: T) -> Self
    {   DraftingEngine
        {   transport
          , model_config: ModelConfig::default()
        }
    }

    /// Replace the default model options used by `generate`
    pub fn with_model_config(mut self, model_config: ModelConfig) -> Self
    {   self.model_config = model_config;
        self
    }

    pub fn model_config(&self) -> &ModelConfig
    {   &self.model_config
    }

    pub fn transport(&self) -> &T
    {   &self.transport
    }

    /// Draft a document with the engine's default model options
    pub async fn generate(
      &self
    , document_type: DocumentType
    , case_data: &CaseData
    ) -> GenerationResult
    {   self.generate_with(document_type, case_data, &self.model_config)
          .await
    }

    /// Draft a document described by a full request
    pub async fn run(&self, request: &GenerationRequest) -> GenerationResult
    {   self.generate_with(
          request.document_type,
          &request.case_data,
          &request.model_config
        ).await
    }

    /// Draft a document with explicit model options
    pub async fn generate_with(
      &self
    , document_type: DocumentType
    , case_data: &CaseData
    , model_config: &ModelConfig
    ) -> GenerationResult
    {   let result: GenerationResult = self
          .attempt(document_type, case_data, model_config)
          .await
          .into();
        if let GenerationResult::Failure { kind, detail } = &result
        {   error!(
              "Generating {} failed ({}): {}",
              document_type.file_stem(),
              kind,
              detail
            );
        }
        result
    }

    /// Like `generate_with`, but re-attempts retryable failures
    /// (network errors, 429, 5xx) following `policy`
    pub async fn generate_with_retry(
      &self
    , document_type: DocumentType
    , case_data: &CaseData
    , model_config: &ModelConfig
    , policy: &RetryPolicy
    ) -> GenerationResult
    {   let mut attempt = 0;
        loop
        {   let outcome = self
              .attempt(document_type, case_data, model_config)
              .await;
            let error = match outcome
            {   Err(e) if attempt < policy.max_retries && is_retryable(&e) => e
              , other => return other.into()
            };
            let wait = policy.backoff_for_attempt(attempt);
            info!(
              "Attempt {} for {} failed ({}), retrying in {:?}",
              attempt + 1,
              document_type.file_stem(),
              error,
              wait
            );
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }

    /// Validate, build the prompt, then make the one request
    async fn attempt(
      &self
    , document_type: DocumentType
    , case_data: &CaseData
    , model_config: &ModelConfig
    ) -> TransportOutcome
    {   debug!("Generating {}", document_type.file_stem());
        let validated = validator::check(document_type, case_data)?;
        model_config.validate()?;
        let prompt = validated.prompt();
        debug!(
          "Built prompt: {} system bytes, {} user bytes",
          prompt.system_context.len(),
          prompt.user_prompt.len()
        );
        self.transport
          .complete(
            &prompt.system_context,
            &prompt.user_prompt,
            model_config
          )
          .await
    }
}
