pub mod error;
pub mod config;
pub mod case_data;
pub mod validator;
pub mod prompt;
pub mod providers;
pub mod request;
pub mod retry;
pub mod client;
use serde::{Deserialize, Serialize};

/*

juridico drafts Brazilian legal documents. The form layer hands
over a document type plus the case facts; the engine validates
them, builds a system/user prompt pair, sends one chat-completion
request and returns a tagged result the form can show.

juridico/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports, document types, results
│   ├── error.rs        # Error taxonomy and user-facing details
│   ├── config.rs       # Credential/endpoint and model options
│   ├── case_data.rs    # Case data record handed over by the form
│   ├── validator.rs    # Required-field checks per document type
│   ├── prompt.rs       # System context and user prompt builder
│   ├── providers/      # Completion transports
│   │   ├── mod.rs
│   │   └── chat_completions.rs
│   ├── request.rs      # Generation request/result types
│   ├── retry.rs        # Opt-in caller-side retry policy
│   └── client.rs       # DraftingEngine (generate entry point)
└── tests/

*/

pub use case_data::{CaseData, FieldValue};
pub use client::DraftingEngine;
pub use config::{EngineConfig, ModelConfig};
pub use error::{Error, ErrorKind};
pub use prompt::Prompt;
pub use providers::{CompletionClient, CompletionTransport};
pub use request::{GenerationRequest, GenerationResult};
pub use validator::{ValidatedCase, ValidationOutcome};

/// Outcome of a single completion request
pub type TransportOutcome = Result<String, crate::error::Error>;

/// Legal instruments the engine can draft.
/// Each variant fixes the required fields and the system context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DocumentType
{   /// Petição inicial (opens a lawsuit)
    PeticaoInicial
  , /// Contestação (defendant's answer)
    Contestacao
  , /// Contrato
    Contrato
  , /// Parecer jurídico (legal opinion)
    ParecerJuridico
  , /// Notificação extrajudicial
    NotificacaoExtrajudicial
}

impl DocumentType
{   /// Every document type, in form order
    pub const ALL: [DocumentType; 5] =
      [ DocumentType::PeticaoInicial
      , DocumentType::Contestacao
      , DocumentType::Contrato
      , DocumentType::ParecerJuridico
      , DocumentType::NotificacaoExtrajudicial
      ];

    /// Portuguese display name
    pub fn display_name(&self) -> &'static str
    {   match self
        {   DocumentType::PeticaoInicial => "Petição Inicial"
          , DocumentType::Contestacao => "Contestação"
          , DocumentType::Contrato => "Contrato"
          , DocumentType::ParecerJuridico => "Parecer Jurídico"
          , DocumentType::NotificacaoExtrajudicial => {
              "Notificação Extrajudicial"
            }
        }
    }

    /// ASCII slug, used for download file names
    pub fn file_stem(&self) -> &'static str
    {   match self
        {   DocumentType::PeticaoInicial => "peticao_inicial"
          , DocumentType::Contestacao => "contestacao"
          , DocumentType::Contrato => "contrato"
          , DocumentType::ParecerJuridico => "parecer_juridico"
          , DocumentType::NotificacaoExtrajudicial => {
              "notificacao_extrajudicial"
            }
        }
    }

    /// Top-level case fields that must be present and non-blank
    pub fn required_fields(&self) -> &'static [&'static str]
    {   match self
        {   DocumentType::PeticaoInicial => {
              &["autor", "reu", "fatos", "pedidos"]
            }
          , DocumentType::Contestacao => {
              &["numero_processo", "autor", "reu", "defesa"]
            }
          , DocumentType::Contrato => {
              &["tipo_contrato", "contratante", "contratado", "objeto"]
            }
          , DocumentType::ParecerJuridico => {
              &["consulente", "consulta", "fatos"]
            }
          , DocumentType::NotificacaoExtrajudicial => {
              &["notificante", "notificado", "fatos", "providencia"]
            }
        }
    }
}

impl std::fmt::Display for DocumentType
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for DocumentType
{   type Err = crate::error::Error;

    /// Accepts the slug, the variant name or the display name
    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim();
        DocumentType::ALL
          .iter()
          .find(|d| {
            d.file_stem().eq_ignore_ascii_case(wanted)
              || format!("{:?}", d).eq_ignore_ascii_case(wanted)
              || d.display_name().to_lowercase() == wanted.to_lowercase()
          })
          .copied()
          .ok_or_else(|| {
            crate::error::Error::InvalidConfiguration(
              format!("unknown document type: {}", wanted)
            )
          })
    }
}
