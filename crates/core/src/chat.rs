//! Chat transcript types and the owner-key invariant.
//!
//! A transcript is owned by exactly one of a registered user id or an
//! anonymous session id, never both and never neither. The store keeps at
//! most one transcript per owner and rewrites the full message list on
//! every save (last-writer-wins).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One turn in a chat transcript. Display order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// The identifier that scopes a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerKey {
    /// A registered user's id.
    User(DbId),
    /// An anonymous browser session id.
    Session(String),
}

impl OwnerKey {
    /// Build an owner key from the optional pair carried on the wire,
    /// enforcing the exactly-one-of-two invariant.
    pub fn from_parts(user_id: Option<DbId>, session_id: Option<String>) -> Result<Self, CoreError> {
        match (user_id, session_id) {
            (Some(id), None) => Ok(OwnerKey::User(id)),
            (None, Some(sid)) if !sid.trim().is_empty() => Ok(OwnerKey::Session(sid)),
            (None, Some(_)) => Err(CoreError::Validation(
                "sessionId must not be blank".to_string(),
            )),
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "Provide either userId or sessionId, not both".to_string(),
            )),
            (None, None) => Err(CoreError::Validation(
                "Either userId or sessionId is required".to_string(),
            )),
        }
    }
}
