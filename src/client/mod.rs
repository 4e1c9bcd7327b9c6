//! The client for the bank's REST backend.
//!
//! [BankApi] is the seam the pages depend on, [BankClient] implements it over HTTP.

mod error;
mod wire;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    Error,
    account::{AccountId, AccountRecord},
    amount::Amount,
    transaction::{PaymentKind, TransactionRecord},
};

pub use error::{ClientError, ErrorKind};

use wire::{
    NewTransactionBody, NewTransferBody, error_message, normalize_accounts,
    normalize_transactions,
};

/// The backend used when no URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Shown when the transaction history cannot be fetched.
pub const FETCH_TRANSACTIONS_FAILED: &str = "Erro ao buscar transações";
/// Shown when the destination accounts cannot be fetched.
pub const FETCH_ACCOUNTS_FAILED: &str = "Erro ao buscar contas";
/// Shown when a deposit or withdrawal fails without a message from the backend.
pub const CREATE_TRANSACTION_FAILED: &str = "Erro ao processar transação";
/// Shown when a transfer fails without a message from the backend.
pub const CREATE_TRANSFER_FAILED: &str = "Erro ao processar transferência";
/// Shown when the backend does not answer in time.
pub const REQUEST_TIMED_OUT: &str = "O servidor demorou demais para responder. Tente novamente.";

/// The operations the pages need from the bank backend.
///
/// Mutating calls are never retried.
#[async_trait]
pub trait BankApi: Send + Sync {
    /// Get the transaction history of `account_id` in the order the backend keeps it.
    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<TransactionRecord>, ClientError>;

    /// Deposit into or withdraw from `account_id`.
    async fn create_transaction(
        &self,
        account_id: &AccountId,
        kind: PaymentKind,
        amount: Amount,
    ) -> Result<(), ClientError>;

    /// Move `amount` from `account_id` to `receiver_account_id`.
    async fn create_transfer(
        &self,
        account_id: &AccountId,
        receiver_account_id: &AccountId,
        amount: Amount,
    ) -> Result<(), ClientError>;

    /// Get every account at the bank.
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, ClientError>;
}

/// A [BankApi] backed by HTTP requests to the bank's REST API.
#[derive(Debug, Clone)]
pub struct BankClient {
    http_client: Client,
    base_url: String,
}

impl BankClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// Requests that take longer than `timeout` fail with [ClientError::Timeout].
    ///
    /// # Errors
    /// Returns [Error::HttpClient] if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a GET request and return the body of a 2xx response.
    async fn get_text(&self, path: &str, failure_message: &str) -> Result<String, ClientError> {
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(|error| transport_error(error, failure_message))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {path} failed with status {status}");
            return Err(ClientError::Network {
                status: Some(status),
                message: failure_message.to_owned(),
            });
        }

        response
            .text()
            .await
            .map_err(|error| transport_error(error, failure_message))
    }

    /// Send a POST request with a JSON body, ignoring the body of a 2xx response.
    async fn post_json(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        failure_message: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|error| transport_error(error, failure_message))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(rejection(path, response, failure_message).await)
        }
    }
}

/// Turn a non-2xx response into a [ClientError::Network], preferring the backend's message.
async fn rejection(path: &str, response: Response, failure_message: &str) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| failure_message.to_owned());

    tracing::warn!("POST {path} was rejected with status {status}: {message}");

    ClientError::Network {
        status: Some(status),
        message,
    }
}

fn transport_error(error: reqwest::Error, failure_message: &str) -> ClientError {
    if error.is_timeout() {
        tracing::warn!("request timed out: {error}");
        ClientError::Timeout(REQUEST_TIMED_OUT.to_owned())
    } else {
        tracing::error!("could not reach the bank backend: {error}");
        ClientError::Network {
            status: None,
            message: failure_message.to_owned(),
        }
    }
}

fn transactions_path(account_id: &AccountId) -> String {
    format!("/accounts/{account_id}/transactions")
}

#[async_trait]
impl BankApi for BankClient {
    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<TransactionRecord>, ClientError> {
        let body = self
            .get_text(&transactions_path(account_id), FETCH_TRANSACTIONS_FAILED)
            .await?;

        normalize_transactions(&body, account_id).map_err(|error| {
            tracing::warn!("unexpected transaction list from the backend: {error}");
            ClientError::Parse(FETCH_TRANSACTIONS_FAILED.to_owned())
        })
    }

    async fn create_transaction(
        &self,
        account_id: &AccountId,
        kind: PaymentKind,
        amount: Amount,
    ) -> Result<(), ClientError> {
        self.post_json(
            &transactions_path(account_id),
            &NewTransactionBody::new(kind, amount),
            CREATE_TRANSACTION_FAILED,
        )
        .await
    }

    async fn create_transfer(
        &self,
        account_id: &AccountId,
        receiver_account_id: &AccountId,
        amount: Amount,
    ) -> Result<(), ClientError> {
        self.post_json(
            &format!("/accounts/{account_id}/transfers"),
            &NewTransferBody::new(receiver_account_id, amount),
            CREATE_TRANSFER_FAILED,
        )
        .await
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, ClientError> {
        let body = self.get_text("/accounts", FETCH_ACCOUNTS_FAILED).await?;

        normalize_accounts(&body).map_err(|error| {
            tracing::warn!("unexpected account list from the backend: {error}");
            ClientError::Parse(FETCH_ACCOUNTS_FAILED.to_owned())
        })
    }
}
