//! Accounts held at the bank backend.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The identifier the backend uses for an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account ID from the backend's identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An account that can receive a transfer.
///
/// Only the fields needed to populate the destination selector are kept, balances of
/// other accounts are never shown.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub name: String,
    pub document: String,
}

impl AccountRecord {
    /// The text shown for the account in the destination selector.
    pub fn label(&self) -> String {
        format!("{} - Documento : {}", self.name, self.document)
    }
}
