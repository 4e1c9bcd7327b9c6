//! The backend's JSON envelopes and their normalization into records.
//!
//! Collections arrive as `{ <name>: { data: [{ id, attributes: {...} }] } }` with numbers
//! that may be encoded as strings. Nothing outside this module depends on that shape.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    account::{AccountId, AccountRecord},
    amount::Amount,
    transaction::{PaymentKind, TransactionRecord, TransactionType},
};

/// Why a response body could not be normalized. Only ever logged.
#[derive(Debug, thiserror::Error, PartialEq)]
pub(super) enum ShapeError {
    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("field {field} of record {index} is not a number")]
    NotANumber { index: usize, field: &'static str },

    #[error("record {index} has an invalid created_at {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("account {index} has no id")]
    MissingAccountId { index: usize },
}

/// A number that may have been sent as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(number) => *number,
            LooseNumber::Text(text) => text.trim().parse().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

/// An identifier that may have been sent as a string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseId {
    Text(String),
    Number(serde_json::Number),
}

impl LooseId {
    /// Whole numbers sent as floats, such as `7.0`, become the same key as `7`.
    fn into_string(self) -> String {
        match self {
            LooseId::Text(text) => text,
            LooseId::Number(number) => match number.as_f64() {
                Some(value) if number.is_f64() && value.fract() == 0.0 => format!("{value:.0}"),
                _ => number.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
struct Collection<A> {
    #[serde(default)]
    data: Option<Vec<Resource<A>>>,
}

#[derive(Debug, Deserialize)]
struct Resource<A> {
    #[serde(default)]
    id: Option<LooseId>,
    attributes: A,
}

#[derive(Debug, Deserialize)]
struct TransactionsEnvelope {
    #[serde(default)]
    transactions: Option<Collection<TransactionAttributes>>,
}

#[derive(Debug, Deserialize)]
struct TransactionAttributes {
    #[serde(default)]
    id: Option<LooseId>,
    transaction_type: TransactionType,
    amount: LooseNumber,
    balance_before: LooseNumber,
    balance_after: LooseNumber,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct AccountsEnvelope {
    #[serde(default)]
    accounts: Option<Collection<AccountAttributes>>,
}

#[derive(Debug, Deserialize)]
struct AccountAttributes {
    name: String,
    document: LooseId,
}

/// The body of a deposit or withdrawal request.
#[derive(Debug, Serialize)]
pub(super) struct NewTransactionBody {
    transaction: NewTransaction,
}

#[derive(Debug, Serialize)]
struct NewTransaction {
    transaction_type: PaymentKind,
    amount: Amount,
}

impl NewTransactionBody {
    pub(super) fn new(transaction_type: PaymentKind, amount: Amount) -> Self {
        Self {
            transaction: NewTransaction {
                transaction_type,
                amount,
            },
        }
    }
}

/// The body of a transfer request.
#[derive(Debug, Serialize)]
pub(super) struct NewTransferBody<'a> {
    transfer: NewTransfer<'a>,
}

#[derive(Debug, Serialize)]
struct NewTransfer<'a> {
    receiver_account_id: &'a AccountId,
    amount: Amount,
}

impl<'a> NewTransferBody<'a> {
    pub(super) fn new(receiver_account_id: &'a AccountId, amount: Amount) -> Self {
        Self {
            transfer: NewTransfer {
                receiver_account_id,
                amount,
            },
        }
    }
}

/// The optional message a backend sends along with an error status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the `message` field from an error response body, if there is one.
pub(super) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

/// Normalize a transaction list response.
///
/// A missing `transactions` object or `data` array yields an empty list. Records keep the
/// order the backend sent them in.
pub(super) fn normalize_transactions(
    body: &str,
    account_id: &AccountId,
) -> Result<Vec<TransactionRecord>, ShapeError> {
    let envelope: TransactionsEnvelope =
        serde_json::from_str(body).map_err(|error| ShapeError::Json(error.to_string()))?;

    let resources = envelope
        .transactions
        .and_then(|collection| collection.data)
        .unwrap_or_default();

    resources
        .into_iter()
        .enumerate()
        .map(|(index, resource)| normalize_transaction(index, resource, account_id))
        .collect()
}

fn normalize_transaction(
    index: usize,
    resource: Resource<TransactionAttributes>,
    account_id: &AccountId,
) -> Result<TransactionRecord, ShapeError> {
    let attributes = resource.attributes;
    let number = |value: &LooseNumber, field: &'static str| {
        value
            .to_f64()
            .ok_or(ShapeError::NotANumber { index, field })
    };

    let amount = number(&attributes.amount, "amount")?;
    let balance_before = number(&attributes.balance_before, "balance_before")?;
    let balance_after = number(&attributes.balance_after, "balance_after")?;
    let created_at = OffsetDateTime::parse(&attributes.created_at, &Rfc3339).map_err(|_| {
        ShapeError::InvalidTimestamp {
            index,
            value: attributes.created_at.clone(),
        }
    })?;

    let id = match attributes.id.or(resource.id) {
        Some(id) => id.into_string(),
        None => {
            let key = synthesize_key(account_id, created_at);
            tracing::warn!("transaction {index} has no id, using the key {key}");
            key
        }
    };

    Ok(TransactionRecord {
        id,
        transaction_type: attributes.transaction_type,
        amount,
        balance_before,
        balance_after,
        created_at,
    })
}

/// A key for a record without an id that stays the same across refreshes.
fn synthesize_key(account_id: &AccountId, created_at: OffsetDateTime) -> String {
    format!("{account_id}-{}", created_at.unix_timestamp_nanos())
}

/// Normalize an account list response.
pub(super) fn normalize_accounts(body: &str) -> Result<Vec<AccountRecord>, ShapeError> {
    let envelope: AccountsEnvelope =
        serde_json::from_str(body).map_err(|error| ShapeError::Json(error.to_string()))?;

    envelope
        .accounts
        .and_then(|collection| collection.data)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, resource)| {
            let id = resource
                .id
                .ok_or(ShapeError::MissingAccountId { index })?
                .into_string();

            Ok(AccountRecord {
                id: AccountId::new(id),
                name: resource.attributes.name,
                document: resource.attributes.document.into_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        account::{AccountId, AccountRecord},
        amount::Amount,
        transaction::{PaymentKind, TransactionRecord, TransactionType},
    };

    use super::{
        NewTransactionBody, NewTransferBody, ShapeError, error_message, normalize_accounts,
        normalize_transactions,
    };

    fn account() -> AccountId {
        AccountId::new("1")
    }

    #[test]
    fn normalizes_string_encoded_numbers() {
        let body = json!({
            "transactions": {
                "data": [{
                    "id": "7",
                    "type": "transaction",
                    "attributes": {
                        "id": 7,
                        "transaction_type": "credit",
                        "amount": "50.0",
                        "balance_before": "200.0",
                        "balance_after": 250,
                        "created_at": "2025-03-01T12:34:56.789Z"
                    }
                }]
            }
        })
        .to_string();

        let got = normalize_transactions(&body, &account()).unwrap();

        assert_eq!(
            got,
            vec![TransactionRecord {
                id: "7".to_owned(),
                transaction_type: TransactionType::Credit,
                amount: 50.0,
                balance_before: 200.0,
                balance_after: 250.0,
                created_at: datetime!(2025-03-01 12:34:56.789 UTC),
            }]
        );
    }

    #[test]
    fn accepts_float_and_unsigned_ids() {
        let record = |id: serde_json::Value| {
            json!({
                "attributes": {
                    "id": id,
                    "transaction_type": "debit",
                    "amount": 5,
                    "balance_before": 20,
                    "balance_after": 15,
                    "created_at": "2025-03-01T12:00:00Z"
                }
            })
        };
        let body = json!({
            "transactions": { "data": [
                record(json!(7.0)),
                record(json!(18_446_744_073_709_551_615_u64)),
                record(json!(2.5)),
            ]}
        })
        .to_string();

        let got = normalize_transactions(&body, &account()).unwrap();

        let ids = got.iter().map(|record| record.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["7", "18446744073709551615", "2.5"]);
    }

    #[test]
    fn falls_back_to_resource_id() {
        let body = json!({
            "transactions": { "data": [{
                "id": "42",
                "attributes": {
                    "transaction_type": "transfer",
                    "amount": 10,
                    "balance_before": 20,
                    "balance_after": 10,
                    "created_at": "2025-03-01T12:00:00-03:00"
                }
            }]}
        })
        .to_string();

        let got = normalize_transactions(&body, &account()).unwrap();

        assert_eq!(got[0].id, "42");
        assert_eq!(got[0].transaction_type, TransactionType::Transfer);
    }

    #[test]
    fn synthesizes_stable_key_when_id_is_missing() {
        let body = json!({
            "transactions": { "data": [{
                "attributes": {
                    "transaction_type": "debit",
                    "amount": 10,
                    "balance_before": 20,
                    "balance_after": 10,
                    "created_at": "1970-01-01T00:00:01Z"
                }
            }]}
        })
        .to_string();

        let first = normalize_transactions(&body, &account()).unwrap();
        let second = normalize_transactions(&body, &account()).unwrap();

        assert_eq!(first[0].id, "1-1000000000");
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn missing_data_is_an_empty_list() {
        let cases = [
            json!({}),
            json!({ "transactions": {} }),
            json!({ "transactions": { "data": null } }),
            json!({ "transactions": null }),
        ];

        for body in cases {
            let got = normalize_transactions(&body.to_string(), &account());

            assert_eq!(got, Ok(vec![]), "want empty list for {body}");
        }
    }

    #[test]
    fn keeps_server_order() {
        let record = |id: &str, created_at: &str| {
            json!({ "attributes": {
                "id": id,
                "transaction_type": "credit",
                "amount": 1,
                "balance_before": 0,
                "balance_after": 1,
                "created_at": created_at
            }})
        };
        let body = json!({ "transactions": { "data": [
            record("b", "2025-01-02T00:00:00Z"),
            record("a", "2025-01-03T00:00:00Z"),
            record("c", "2025-01-01T00:00:00Z"),
        ]}})
        .to_string();

        let ids = normalize_transactions(&body, &account())
            .unwrap()
            .into_iter()
            .map(|record| record.id)
            .collect::<Vec<_>>();

        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn rejects_malformed_records() {
        let attributes = |field: &str, value: serde_json::Value| {
            let mut attributes = json!({
                "id": "1",
                "transaction_type": "credit",
                "amount": "1.0",
                "balance_before": "0",
                "balance_after": "1",
                "created_at": "2025-01-01T00:00:00Z"
            });
            attributes[field] = value;
            json!({ "transactions": { "data": [{ "attributes": attributes }] } }).to_string()
        };

        let got = normalize_transactions(&attributes("amount", json!("abc")), &account());
        assert_eq!(
            got,
            Err(ShapeError::NotANumber {
                index: 0,
                field: "amount"
            })
        );

        let got = normalize_transactions(&attributes("created_at", json!("yesterday")), &account());
        assert!(matches!(got, Err(ShapeError::InvalidTimestamp { .. })));

        let got = normalize_transactions(&attributes("transaction_type", json!("refund")), &account());
        assert!(matches!(got, Err(ShapeError::Json(_))));

        let got = normalize_transactions("<html>oops</html>", &account());
        assert!(matches!(got, Err(ShapeError::Json(_))));
    }

    #[test]
    fn normalizes_accounts() {
        let body = json!({
            "accounts": { "data": [
                { "id": "2", "attributes": { "name": "Maria", "document": "12345678900" } },
                { "id": 3, "attributes": { "name": "João", "document": 98765432100_i64 } }
            ]}
        })
        .to_string();

        let got = normalize_accounts(&body).unwrap();

        assert_eq!(
            got,
            vec![
                AccountRecord {
                    id: AccountId::new("2"),
                    name: "Maria".to_owned(),
                    document: "12345678900".to_owned(),
                },
                AccountRecord {
                    id: AccountId::new("3"),
                    name: "João".to_owned(),
                    document: "98765432100".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn accounts_without_id_are_rejected() {
        let body = json!({
            "accounts": { "data": [{ "attributes": { "name": "Maria", "document": "1" } }] }
        })
        .to_string();

        assert_eq!(
            normalize_accounts(&body),
            Err(ShapeError::MissingAccountId { index: 0 })
        );
    }

    #[test]
    fn request_bodies_match_backend_shape() {
        let amount = Amount::new(50.0).unwrap();

        let transaction = serde_json::to_value(NewTransactionBody::new(PaymentKind::Debit, amount));
        assert_eq!(
            transaction.unwrap(),
            json!({ "transaction": { "transaction_type": "debit", "amount": 50.0 } })
        );

        let receiver = AccountId::new("2");
        let transfer = serde_json::to_value(NewTransferBody::new(&receiver, amount));
        assert_eq!(
            transfer.unwrap(),
            json!({ "transfer": { "receiver_account_id": "2", "amount": 50.0 } })
        );
    }

    #[test]
    fn extracts_backend_error_message() {
        assert_eq!(
            error_message(r#"{"message":"Saldo insuficiente"}"#),
            Some("Saldo insuficiente".to_owned())
        );
        assert_eq!(error_message(r#"{"error":"nope"}"#), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
        assert_eq!(error_message("Internal Server Error"), None);
    }
}
