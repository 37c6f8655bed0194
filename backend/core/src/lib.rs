//! `remitex-core` — shared building blocks for the Remitex runtime.
//!
//! Holds the error type, the LLM provider trait with its request/response
//! structs, and the serde model of the payment-advice record the extraction
//! prompt asks the model to produce.

pub mod error;
pub mod traits;
pub mod types;

pub use error::RemitexError;
pub use traits::{LlmProvider, LlmRequest, LlmResponse};
pub use types::{AdviceEnvelope, PaymentAdvice, PaymentDetail};
