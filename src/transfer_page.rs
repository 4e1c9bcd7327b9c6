//! The transfer page and its endpoints.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use axum_htmx::HX_TRIGGER;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    account::{AccountId, AccountRecord},
    client::ClientError,
    controller::{MISSING_DESTINATION_MESSAGE, PageController, SubmitOutcome},
    endpoints,
    history::{HISTORY_CONTAINER_ID, HistoryState, history_out_of_band, history_placeholder},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, form_error,
    },
    theme::Theme,
    transaction::TransactionRecord,
};

/// The event htmx fires on the transfer form after a transfer went through.
pub const TRANSFER_COMPLETED_EVENT: &str = "transfer-completed";

const TRANSFER_FIELDS_ID: &str = "transfer-fields";
const TRANSFER_CONTROLS_ID: &str = "transfer-controls";

/// The transfer form. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct TransferForm {
    #[serde(default)]
    pub receiver_account_id: String,
    #[serde(default)]
    pub amount: String,
}

/// A controller whose records are the accounts a transfer can be sent to.
///
/// The source account is left out.
fn destination_controller(state: &HistoryState) -> PageController<AccountRecord> {
    let bank = state.bank.clone();
    let source = state.account_id.clone();

    PageController::new(move || {
        let bank = bank.clone();
        let source = source.clone();
        async move {
            let accounts = bank.list_accounts().await?;

            Ok(accounts
                .into_iter()
                .filter(|account| account.id != source)
                .collect())
        }
    })
}

/// A controller for a transfer submitted with `form`.
fn transfer_controller(
    state: &HistoryState,
    form: &TransferForm,
) -> PageController<TransactionRecord> {
    let controller = state.controller().with_destination();
    controller.set_amount(&form.amount);
    controller.set_destination(Some(AccountId::new(form.receiver_account_id.as_str())));
    controller
}

/// Render the transfer page.
///
/// The destination accounts are fetched before the page is rendered. The history is
/// fetched by htmx once the page has loaded.
pub async fn get_transfer_page(State(state): State<HistoryState>, jar: CookieJar) -> Response {
    let theme = Theme::from_jar(&jar);

    let destinations = destination_controller(&state);
    destinations.mount().await;
    let destinations = destinations.snapshot();

    let accounts_error = destinations
        .error
        .as_ref()
        .map(|error| error.message.as_str());

    let content = html! {
        div class={ (PAGE_CONTAINER_STYLE) " lg:flex-row lg:items-start" }
        {
            section class=(FORM_CONTAINER_STYLE)
            {
                (transfer_form(&destinations.records, accounts_error))
            }
            (history_placeholder(theme, state.timezone))
        }
    };

    base("Transferência", endpoints::TRANSFER_VIEW, theme, &content).into_response()
}

/// Transfer money from the account to the selected destination.
///
/// Responds with the amount field and submit button. On success these are cleared, the
/// refreshed history is swapped in out of band and [TRANSFER_COMPLETED_EVENT] is triggered
/// so the page resets the destination selector. On failure the inputs are kept and the
/// error is shown.
pub async fn create_transfer_endpoint(
    State(state): State<HistoryState>,
    jar: CookieJar,
    Form(form): Form<TransferForm>,
) -> Response {
    let theme = Theme::from_jar(&jar);
    let controller = transfer_controller(&state, &form);

    let bank = state.bank.clone();
    let account_id = state.account_id.clone();
    let outcome = controller
        .submit(move |submission| async move {
            let Some(receiver) = submission.destination else {
                return Err(ClientError::Validation(
                    MISSING_DESTINATION_MESSAGE.to_owned(),
                ));
            };

            bank.create_transfer(&account_id, &receiver, submission.amount)
                .await
        })
        .await;

    let page = controller.snapshot();
    controller.unmount();

    if outcome == SubmitOutcome::Completed {
        tracing::info!(
            "transfer of {} to account {} accepted",
            form.amount.trim(),
            form.receiver_account_id
        );

        let markup = html! {
            (transfer_fields(&page.form.amount, None, page.can_submit()))
            (history_out_of_band(&page, theme, state.timezone))
        };

        return ([(HX_TRIGGER, TRANSFER_COMPLETED_EVENT)], markup).into_response();
    }

    let error = page.error.as_ref().map(|error| error.message.as_str());
    transfer_fields(&page.form.amount, error, page.can_submit()).into_response()
}

/// Re-render the transfer button for the current amount and destination.
pub async fn get_transfer_controls(
    State(state): State<HistoryState>,
    Form(form): Form<TransferForm>,
) -> Response {
    let controller = transfer_controller(&state, &form);

    transfer_controls(controller.snapshot().can_submit()).into_response()
}

fn transfer_form(accounts: &[AccountRecord], accounts_error: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSFERS_API)
            hx-target={ "#" (TRANSFER_FIELDS_ID) }
            hx-swap="outerHTML"
            hx-sync={ "#" (HISTORY_CONTAINER_ID) ":replace" }
            hx-disinherit="hx-sync"
            hx-disabled-elt="find select, find input, find button"
            class="w-full space-y-4"
        {
            div
            {
                label for="receiver_account_id" class=(FORM_LABEL_STYLE) { "Conta Destino" }

                select
                    id="receiver_account_id"
                    name="receiver_account_id"
                    required
                    hx-post=(endpoints::TRANSFER_CONTROLS)
                    hx-trigger="change"
                    hx-target={ "#" (TRANSFER_CONTROLS_ID) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Selecione uma conta" }

                    @for account in accounts {
                        option value=(account.id.as_str()) { (account.label()) }
                    }
                }

                @if let Some(message) = accounts_error {
                    p class={ "mt-2 " (FORM_ERROR_STYLE) } role="alert" { (message) }
                }
            }

            (transfer_fields("", None, false))
        }
    }
}

fn transfer_fields(amount: &str, error_message: Option<&str>, can_submit: bool) -> Markup {
    html! {
        div id=(TRANSFER_FIELDS_ID) class="space-y-4"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Valor (R$)" }

                input
                    id="amount"
                    type="text"
                    name="amount"
                    inputmode="decimal"
                    placeholder="0,00"
                    value=(amount)
                    required
                    autocomplete="off"
                    hx-post=(endpoints::TRANSFER_CONTROLS)
                    hx-trigger="input changed delay:200ms"
                    hx-target={ "#" (TRANSFER_CONTROLS_ID) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (transfer_controls(can_submit))

            (form_error(error_message))
        }
    }
}

fn transfer_controls(can_submit: bool) -> Markup {
    html! {
        div id=(TRANSFER_CONTROLS_ID)
        {
            button
                type="submit"
                disabled[!can_submit]
                aria-label="Transferir valor"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="idle-label" { "Transferir" }
                span class="htmx-indicator" { "Processando..." }
            }
        }
    }
}
