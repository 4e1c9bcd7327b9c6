use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use time::macros::datetime;

use crate::{
    account::{AccountId, AccountRecord},
    amount::Amount,
    client::{BankApi, ClientError},
    transaction::{PaymentKind, TransactionRecord, TransactionType},
};

/// The requests a [FakeBank] has received.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Calls {
    pub list_transactions: usize,
    pub list_accounts: usize,
    pub transactions: Vec<(AccountId, PaymentKind, f64)>,
    pub transfers: Vec<(AccountId, AccountId, f64)>,
}

impl Calls {
    /// Every request sent, reads and mutations alike.
    pub fn total(&self) -> usize {
        self.list_transactions + self.list_accounts + self.transactions.len() + self.transfers.len()
    }
}

/// A [BankApi] that records every call and answers from canned responses.
///
/// Reads of the transaction list are answered from a queue: each call takes the next
/// response, and the last one is repeated once the queue runs dry. A read can also be held
/// back for a while to make responses arrive out of order.
#[derive(Debug, Clone)]
pub(crate) struct FakeBank {
    inner: Arc<Mutex<FakeBankInner>>,
}

#[derive(Debug)]
struct FakeBankInner {
    transaction_reads: VecDeque<Result<Vec<TransactionRecord>, ClientError>>,
    read_delays: VecDeque<Duration>,
    accounts: Result<Vec<AccountRecord>, ClientError>,
    mutation_result: Result<(), ClientError>,
    calls: Calls,
}

impl FakeBank {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeBankInner {
                transaction_reads: VecDeque::from([Ok(vec![])]),
                read_delays: VecDeque::new(),
                accounts: Ok(vec![]),
                mutation_result: Ok(()),
                calls: Calls::default(),
            })),
        }
    }

    /// Answer every transaction read with `records`.
    pub fn with_transactions(self, records: Vec<TransactionRecord>) -> Self {
        self.inner.lock().unwrap().transaction_reads = VecDeque::from([Ok(records)]);
        self
    }

    /// Answer successive transaction reads with `reads`, repeating the last one.
    pub fn with_transaction_reads(
        self,
        reads: Vec<Result<Vec<TransactionRecord>, ClientError>>,
    ) -> Self {
        assert!(!reads.is_empty(), "need at least one read response");
        self.inner.lock().unwrap().transaction_reads = reads.into();
        self
    }

    /// Hold successive transaction reads back by `delays`, later reads are not delayed.
    pub fn with_read_delays(self, delays: Vec<Duration>) -> Self {
        self.inner.lock().unwrap().read_delays = delays.into();
        self
    }

    pub fn with_accounts(self, accounts: Result<Vec<AccountRecord>, ClientError>) -> Self {
        self.inner.lock().unwrap().accounts = accounts;
        self
    }

    /// Answer every deposit, withdrawal and transfer with `result`.
    pub fn with_mutation_result(self, result: Result<(), ClientError>) -> Self {
        self.inner.lock().unwrap().mutation_result = result;
        self
    }

    pub fn calls(&self) -> Calls {
        self.inner.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl BankApi for FakeBank {
    async fn list_transactions(
        &self,
        _account_id: &AccountId,
    ) -> Result<Vec<TransactionRecord>, ClientError> {
        let (response, delay) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.list_transactions += 1;

            let response = if inner.transaction_reads.len() > 1 {
                inner.transaction_reads.pop_front()
            } else {
                inner.transaction_reads.front().cloned()
            };

            (
                response.expect("no transaction reads configured"),
                inner.read_delays.pop_front(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        response
    }

    async fn create_transaction(
        &self,
        account_id: &AccountId,
        kind: PaymentKind,
        amount: Amount,
    ) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .calls
            .transactions
            .push((account_id.clone(), kind, amount.value()));
        inner.mutation_result.clone()
    }

    async fn create_transfer(
        &self,
        account_id: &AccountId,
        receiver_account_id: &AccountId,
        amount: Amount,
    ) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.transfers.push((
            account_id.clone(),
            receiver_account_id.clone(),
            amount.value(),
        ));
        inner.mutation_result.clone()
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.list_accounts += 1;
        inner.accounts.clone()
    }
}

/// A deposit of 50.00 that took the balance from 200.00 to 250.00.
pub(crate) fn deposit_record(id: &str) -> TransactionRecord {
    TransactionRecord {
        id: id.to_owned(),
        transaction_type: TransactionType::Credit,
        amount: 50.0,
        balance_before: 200.0,
        balance_after: 250.0,
        created_at: datetime!(2025-03-01 12:34:56 UTC),
    }
}

pub(crate) fn account_record(id: &str, name: &str) -> AccountRecord {
    AccountRecord {
        id: AccountId::new(id),
        name: name.to_owned(),
        document: format!("000.000.000-0{id}"),
    }
}
