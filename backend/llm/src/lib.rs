//! `remitex-llm` — prompt construction and completion providers.
//!
//! The prompt module owns the fixed payment-advice instruction template and
//! sampling parameters; providers implement `LlmProvider` against hosted
//! chat-completions APIs; parse turns an opaque model reply into the JSON
//! value the gateway returns.

pub mod parse;
pub mod prompt;
pub mod providers;

pub use parse::parse_model_output;
pub use prompt::advice_request;
pub use providers::ProviderRegistry;
