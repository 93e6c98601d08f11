//! Recommendation bridge: one external process invocation per call.
//!
//! Serializes a user's onboarding answers (plus an optional chat message)
//! as JSON, pipes it to an external recommendation script on stdin, drains
//! stdout and stderr concurrently, and extracts the script's final
//! brace-delimited JSON line as the suggestion. Stateless; processes are
//! never pooled or reused.

pub mod bridge;
pub mod output;

pub use bridge::{run_suggestion, SuggestConfig, SuggestError, SuggestRequest};
