//! Domain types and validation logic shared across the Helio backend.
//!
//! Contains the onboarding question catalog and wizard engine, chat
//! transcript types, account kinds, and the [`error::CoreError`] domain
//! error type consumed by the API layer.

pub mod account;
pub mod chat;
pub mod error;
pub mod onboarding;
pub mod types;
