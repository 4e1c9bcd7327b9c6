//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use time_tz::Tz;

use crate::{Error, account::AccountId, client::BankApi, timezone::get_timezone};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The bank backend the pages read from and submit to.
    pub bank: Arc<dyn BankApi>,

    /// The account whose history is shown and which deposits, withdrawals and transfers
    /// are made from.
    pub account_id: AccountId,

    /// The timezone transaction timestamps are displayed in.
    pub timezone: &'static Tz,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known timezone.
    pub fn new(
        bank: impl BankApi + 'static,
        account_id: AccountId,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            bank: Arc::new(bank),
            account_id,
            timezone: get_timezone(local_timezone)?,
        })
    }
}
