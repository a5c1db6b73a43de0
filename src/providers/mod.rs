//! Completion transports

pub mod chat_completions;

// Re-export for convenience
pub use chat_completions::{CompletionClient, CompletionTransport};
