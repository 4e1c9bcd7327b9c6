//! The state behind a page: the records it displays, its loading flags, its form and the
//! current error message.
//!
//! One [PageController] type serves every page. A page only chooses the read fetch that
//! fills its records (endpoint plus normalization) and whether its form needs a destination
//! account.
//!
//! Read fetches are sequenced: each one takes a ticket, and a response is applied only if
//! its ticket is still the latest issued and the controller is still mounted. A slow
//! response can therefore never overwrite newer records, and nothing is applied after
//! [PageController::unmount].

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::{FutureExt, future::BoxFuture};

use crate::{
    account::AccountId,
    amount::Amount,
    client::{ClientError, ErrorKind},
};

/// The message shown when a transfer is submitted without a destination account.
pub const MISSING_DESTINATION_MESSAGE: &str = "Selecione uma conta de destino.";

type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, ClientError>> + Send + Sync>;

/// Which requests are in flight.
///
/// The two flags are independent so the history panel can show a spinner without disabling
/// the form, and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    /// A read fetch is in flight.
    pub main: bool,
    /// A mutating request is in flight.
    pub action: bool,
}

/// The error currently shown on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ClientError> for PageError {
    fn from(error: &ClientError) -> Self {
        Self {
            kind: error.kind(),
            message: error.message(),
        }
    }
}

/// The values typed into a page's form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// The raw text of the amount input.
    pub amount: String,
    /// The selected destination account, for pages that need one.
    pub destination: Option<AccountId>,
    requires_destination: bool,
}

impl FormState {
    /// Whether the page's form needs a destination account.
    pub fn requires_destination(&self) -> bool {
        self.requires_destination
    }

    fn is_complete(&self) -> bool {
        !self.amount.trim().is_empty() && (!self.requires_destination || self.destination.is_some())
    }

    fn clear(&mut self) {
        self.amount.clear();
        self.destination = None;
    }
}

/// Everything a page renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    /// The records from the latest applied read, in server order.
    pub records: Vec<T>,
    pub loading: LoadingState,
    /// At most one error; the latest failure replaces any earlier one.
    pub error: Option<PageError>,
    pub form: FormState,
}

impl<T> PageState<T> {
    /// Whether the submit controls should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading.action && self.form.is_complete()
    }
}

/// The amount and destination handed to a mutating request once the form is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub amount: Amount,
    /// Always `Some` for pages that require a destination.
    pub destination: Option<AccountId>,
}

/// What happened to a read fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the page's records.
    Applied,
    /// The fetch failed and the error was stored.
    Failed,
    /// A newer fetch was issued while this one was in flight, so its response was dropped.
    Stale,
    /// The controller was unmounted before the response arrived, so it was dropped.
    Detached,
    /// The controller had already been mounted, so no fetch was issued.
    AlreadyMounted,
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission is in flight; nothing was sent.
    Busy,
    /// The form failed validation; nothing was sent.
    Invalid,
    /// The request succeeded, the form was cleared and the records were refreshed.
    Completed,
    /// The request failed and the error was stored. The records were not refreshed.
    Failed,
}

struct Inner<T> {
    state: PageState<T>,
    latest_ticket: u64,
    mounted: bool,
    active: bool,
}

/// Owns a page's state and coordinates its fetches.
///
/// Clones share the same state.
pub struct PageController<T> {
    fetch: Fetch<T>,
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for PageController<T> {
    fn clone(&self) -> Self {
        Self {
            fetch: self.fetch.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T> PageController<T>
where
    T: Clone + Send + 'static,
{
    /// Create a controller whose records come from `fetch`.
    ///
    /// The controller starts with no records, no error and both loading flags cleared.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, ClientError>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move || fetch().boxed()),
            inner: Arc::new(Mutex::new(Inner {
                state: PageState {
                    records: Vec::new(),
                    loading: LoadingState::default(),
                    error: None,
                    form: FormState::default(),
                },
                latest_ticket: 0,
                mounted: false,
                active: true,
            })),
        }
    }

    /// Require a destination account before a submission is sent.
    pub fn with_destination(self) -> Self {
        self.lock().state.form.requires_destination = true;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        // The state is never left half-updated while the lock is held, so a poisoned lock
        // still holds consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state for rendering.
    pub fn snapshot(&self) -> PageState<T> {
        self.lock().state.clone()
    }

    /// Fetch the records for the first time.
    ///
    /// Only the first call issues a fetch, later calls return
    /// [FetchOutcome::AlreadyMounted].
    pub async fn mount(&self) -> FetchOutcome {
        {
            let mut inner = self.lock();
            if inner.mounted {
                return FetchOutcome::AlreadyMounted;
            }
            inner.mounted = true;
        }

        self.refresh().await
    }

    /// Stop applying responses.
    ///
    /// Fetches still in flight are dropped when they complete, and the loading flag for reads
    /// is cleared.
    pub fn unmount(&self) {
        let mut inner = self.lock();
        inner.active = false;
        inner.state.loading.main = false;
    }

    /// Fetch the records again, replacing the current ones on success.
    pub async fn refresh(&self) -> FetchOutcome {
        let ticket = {
            let mut inner = self.lock();
            if !inner.active {
                return FetchOutcome::Detached;
            }
            inner.latest_ticket += 1;
            inner.state.loading.main = true;
            inner.latest_ticket
        };

        let result = (self.fetch)().await;

        let mut inner = self.lock();
        if !inner.active {
            tracing::debug!("dropping read #{ticket}, the page is gone");
            return FetchOutcome::Detached;
        }
        if ticket != inner.latest_ticket {
            tracing::debug!(
                "dropping read #{ticket}, read #{} superseded it",
                inner.latest_ticket
            );
            return FetchOutcome::Stale;
        }

        inner.state.loading.main = false;

        match result {
            Ok(records) => {
                inner.state.records = records;
                FetchOutcome::Applied
            }
            Err(error) => {
                if error.kind() == ErrorKind::Parse {
                    inner.state.records.clear();
                }
                inner.state.error = Some(PageError::from(&error));
                FetchOutcome::Failed
            }
        }
    }

    /// Store the raw text of the amount input.
    pub fn set_amount(&self, amount: &str) {
        self.lock().state.form.amount = amount.to_owned();
    }

    /// Store the selected destination account. An empty selection clears it.
    pub fn set_destination(&self, destination: Option<AccountId>) {
        self.lock().state.form.destination =
            destination.filter(|destination| !destination.as_str().is_empty());
    }

    /// Check that `input` is a positive amount.
    ///
    /// On success any existing error is cleared, on failure the validation error replaces it.
    pub fn validate_amount(&self, input: &str) -> bool {
        self.parse_amount(input).is_some()
    }

    fn parse_amount(&self, input: &str) -> Option<Amount> {
        let mut inner = self.lock();

        match Amount::parse(input) {
            Ok(amount) => {
                inner.state.error = None;
                Some(amount)
            }
            Err(error) => {
                inner.state.error = Some(PageError::from(&error));
                None
            }
        }
    }

    /// Validate the form and send it with `mutation`.
    ///
    /// Validation happens before anything is sent. While the mutation is in flight the
    /// `action` flag is set and further submissions are refused. On success the form is
    /// cleared and the records are fetched again. On failure the error is stored and the
    /// records are left as they were.
    pub async fn submit<F, Fut>(&self, mutation: F) -> SubmitOutcome
    where
        F: FnOnce(Submission) -> Fut,
        Fut: Future<Output = Result<(), ClientError>>,
    {
        let (input, destination, requires_destination) = {
            let inner = self.lock();
            if inner.state.loading.action {
                return SubmitOutcome::Busy;
            }
            let form = &inner.state.form;
            (
                form.amount.clone(),
                form.destination.clone(),
                form.requires_destination,
            )
        };

        let Some(amount) = self.parse_amount(&input) else {
            return SubmitOutcome::Invalid;
        };

        if requires_destination && destination.is_none() {
            self.lock().state.error = Some(PageError::from(&ClientError::Validation(
                MISSING_DESTINATION_MESSAGE.to_owned(),
            )));
            return SubmitOutcome::Invalid;
        }

        {
            let mut inner = self.lock();
            // Checked again in case another submission started while validating.
            if inner.state.loading.action {
                return SubmitOutcome::Busy;
            }
            inner.state.loading.action = true;
        }

        let result = mutation(Submission {
            amount,
            destination,
        })
        .await;

        let outcome = match result {
            Ok(()) => {
                self.lock().state.form.clear();
                self.refresh().await;
                SubmitOutcome::Completed
            }
            Err(error) => {
                self.lock().state.error = Some(PageError::from(&error));
                SubmitOutcome::Failed
            }
        };

        self.lock().state.loading.action = false;

        outcome
    }
}
