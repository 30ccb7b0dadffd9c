//! Relevance reranking (stage 2).
//!
//! One language-model call selects and orders batch-local ids; the reply is
//! validated against the batch and every failure degrades to a prefix of the
//! retrieval order:
//!
//! | Outcome                                  | Result                      |
//! |------------------------------------------|-----------------------------|
//! | call error, timeout or unparsable reply  | first 10 candidates         |
//! | parsed, but no id from the batch         | first 5 candidates          |
//! | valid ids                                | those records, model order  |

pub mod balance;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod reranker;

#[cfg(test)]
mod tests;

pub use balance::{CategoryFamily, QueryIntent, repair_balance};
pub use config::RerankerConfig;
pub use error::{LanguageModelError, RerankError};
#[cfg(any(test, feature = "mock"))]
pub use mock::{ScriptedModel, ScriptedReply};
pub use model::{GenaiModel, LanguageModel};
pub use prompt::{RerankPrompt, build_prompt};
pub use reranker::{RerankOutcome, RerankStatus, Reranker};
