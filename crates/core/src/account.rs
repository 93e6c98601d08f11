//! Account kind enumeration for registered users.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two kinds of accounts the platform supports.
///
/// Organization accounts additionally carry an organization name,
/// collected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Personal,
    Organization,
}

impl AccountKind {
    /// Parse an account kind string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "personal" => Ok(Self::Personal),
            "organization" => Ok(Self::Organization),
            _ => Err(CoreError::Validation(format!(
                "Invalid account kind '{s}'. Must be one of: personal, organization"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Organization => "organization",
        }
    }
}
