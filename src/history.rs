//! The transaction history panel shown beside the deposit/withdraw and transfer forms.
//!
//! [history_panel] is a pure function of the records, the loading flag and the theme. The
//! pages render it in its loading state and htmx fetches the records from
//! [get_transaction_history] once the page has loaded.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use maud::{Markup, html};
use time_tz::Tz;

use crate::{
    AppState,
    account::AccountId,
    client::BankApi,
    controller::{PageController, PageState},
    endpoints,
    html::{format_currency, loading_spinner},
    theme::Theme,
    timezone::format_local_datetime,
    transaction::TransactionRecord,
};

/// The ID of the element the history panel is swapped into.
pub const HISTORY_CONTAINER_ID: &str = "history";

/// The state needed to read and render an account's transaction history.
#[derive(Clone)]
pub struct HistoryState {
    pub bank: Arc<dyn BankApi>,
    pub account_id: AccountId,
    pub timezone: &'static Tz,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            bank: state.bank.clone(),
            account_id: state.account_id.clone(),
            timezone: state.timezone,
        }
    }
}

impl HistoryState {
    /// A controller whose records are the account's transaction history.
    pub fn controller(&self) -> PageController<TransactionRecord> {
        let bank = self.bank.clone();
        let account_id = self.account_id.clone();

        PageController::new(move || {
            let bank = bank.clone();
            let account_id = account_id.clone();
            async move { bank.list_transactions(&account_id).await }
        })
    }
}

/// Fetch the account's transactions and render the history panel.
///
/// A failed read is shown above the panel. The records kept on failure are the ones the
/// controller held before the read, which for a fresh controller is none.
pub async fn get_transaction_history(
    State(state): State<HistoryState>,
    jar: CookieJar,
) -> Response {
    let controller = state.controller();
    controller.mount().await;
    let page = controller.snapshot();
    controller.unmount();

    history_contents(&page, Theme::from_jar(&jar), state.timezone).into_response()
}

/// The history container as first rendered: loading, with htmx fetching the records as
/// soon as it is on the page.
///
/// The forms on the page sync their submits on this container with `replace`, so a submit
/// aborts a read still in flight and the history it refreshes cannot be overwritten by
/// the older read. A read started while a submit is in flight is dropped.
pub fn history_placeholder(theme: Theme, timezone: &Tz) -> Markup {
    html! {
        div
            id=(HISTORY_CONTAINER_ID)
            hx-get=(endpoints::TRANSACTIONS_API)
            hx-trigger="load"
            hx-swap="innerHTML"
            hx-sync="this:drop"
            class="w-full lg:max-w-md"
        {
            (history_panel(&[], true, theme, timezone))
        }
    }
}

/// The refreshed history, swapped into the history container out of band.
pub fn history_out_of_band(
    page: &PageState<TransactionRecord>,
    theme: Theme,
    timezone: &Tz,
) -> Markup {
    html! {
        div id=(HISTORY_CONTAINER_ID) hx-swap-oob="innerHTML"
        {
            (history_contents(page, theme, timezone))
        }
    }
}

fn history_contents(page: &PageState<TransactionRecord>, theme: Theme, timezone: &Tz) -> Markup {
    html! {
        @if let Some(error) = &page.error {
            p
                class="mb-4 p-3 rounded text-sm text-red-700 bg-red-50 dark:text-red-300 dark:bg-red-950"
                role="alert"
            {
                (error.message)
            }
        }

        (history_panel(&page.records, page.loading.main, theme, timezone))
    }
}

/// Render `records` in the order given.
///
/// A spinner replaces the rows while `loading` is set, whatever `records` holds.
pub fn history_panel(
    records: &[TransactionRecord],
    loading: bool,
    theme: Theme,
    timezone: &Tz,
) -> Markup {
    let panel_style = if theme.is_dark() {
        "p-6 rounded-lg shadow bg-gray-800 text-white"
    } else {
        "p-6 rounded-lg shadow bg-white text-gray-900"
    };

    html! {
        aside class=(panel_style) aria-busy=(if loading { "true" } else { "false" })
        {
            h2 class="mb-4 text-xl font-semibold" { "Histórico" }

            @if loading {
                div class="flex justify-center py-8" { (loading_spinner()) }
            } @else if records.is_empty() {
                p class="py-8 text-center text-gray-500 dark:text-gray-400"
                {
                    "Nenhuma transação encontrada"
                }
            } @else {
                ul class="flex flex-col gap-3"
                {
                    @for record in records {
                        (history_row(record, theme, timezone))
                    }
                }
            }
        }
    }
}

fn history_row(record: &TransactionRecord, theme: Theme, timezone: &Tz) -> Markup {
    let is_credit = record.transaction_type.is_credit();
    let (glyph, label_style) = if is_credit {
        ("↑", "font-semibold text-green-600")
    } else {
        ("↓", "font-semibold text-red-600")
    };
    let row_style = if theme.is_dark() {
        "flex gap-4 p-3 rounded border border-gray-700"
    } else {
        "flex gap-4 p-3 rounded border border-gray-200"
    };

    html! {
        li class=(row_style) data-key=(record.id)
        {
            span class={ "text-2xl " (label_style) } aria-hidden="true" { (glyph) }

            div class="flex-1 flex flex-col gap-1"
            {
                div class="flex justify-between"
                {
                    span class=(label_style) { (record.transaction_type.label()) }
                    span class="font-semibold" { (format_currency(record.amount)) }
                }

                div class="flex justify-between text-sm text-gray-500 dark:text-gray-400"
                {
                    span { "Saldo anterior: " (format_currency(record.balance_before)) }
                    span { "Novo saldo: " (format_currency(record.balance_after)) }
                }

                time class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (format_local_datetime(record.created_at, timezone))
                }
            }
        }
    }
}
