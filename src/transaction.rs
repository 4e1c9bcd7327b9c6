//! The transaction records shown in the history panel.
//!
//! Records are only ever created by the backend. The client deserializes them through
//! [crate::client] and never builds one from user input.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The kind of movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
    Transfer,
}

impl TransactionType {
    /// Whether money came into the account.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionType::Credit)
    }

    /// The label displayed in the history panel.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Credit => "CRÉDITO",
            TransactionType::Debit => "DÉBITO",
            TransactionType::Transfer => "TRANSFERÊNCIA",
        }
    }
}

/// The movements a user can request from the deposit/withdraw page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// A deposit.
    Credit,
    /// A withdrawal.
    Debit,
}

impl From<PaymentKind> for TransactionType {
    fn from(kind: PaymentKind) -> Self {
        match kind {
            PaymentKind::Credit => TransactionType::Credit,
            PaymentKind::Debit => TransactionType::Debit,
        }
    }
}

/// A transaction as recorded by the backend.
///
/// `balance_after` should equal `balance_before` plus or minus `amount`, but that is the
/// backend's responsibility and is not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Unique within an account's history. Synthesized from the account ID and timestamp
    /// when the backend omits it.
    pub id: String,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub balance_before: f64,
    pub balance_after: f64,
    pub created_at: OffsetDateTime,
}
