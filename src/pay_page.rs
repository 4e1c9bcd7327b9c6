//! The deposit/withdraw page and its endpoints.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    controller::SubmitOutcome,
    endpoints,
    history::{HISTORY_CONTAINER_ID, HistoryState, history_out_of_band, history_placeholder},
    html::{
        BUTTON_CREDIT_STYLE, BUTTON_DEBIT_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, form_error,
    },
    theme::Theme,
    transaction::PaymentKind,
};

const PAY_CONTROLS_ID: &str = "pay-controls";

/// The deposit/withdraw form as submitted by one of its two buttons.
#[derive(Debug, Deserialize)]
pub struct PayForm {
    /// Set by the button that submitted the form.
    pub transaction_type: PaymentKind,
    #[serde(default)]
    pub amount: String,
}

/// The amount field, sent whenever it changes so the buttons can be enabled.
#[derive(Debug, Deserialize)]
pub struct AmountForm {
    #[serde(default)]
    pub amount: String,
}

/// Render the deposit/withdraw page.
///
/// The history is fetched by htmx once the page has loaded.
pub async fn get_pay_page(State(state): State<HistoryState>, jar: CookieJar) -> Response {
    let theme = Theme::from_jar(&jar);

    let content = html! {
        div class={ (PAGE_CONTAINER_STYLE) " lg:flex-row lg:items-start" }
        {
            section class=(FORM_CONTAINER_STYLE) { (pay_form("", None, false)) }
            (history_placeholder(theme, state.timezone))
        }
    };

    base("Transações", endpoints::PAY_VIEW, theme, &content).into_response()
}

/// Deposit into or withdraw from the account.
///
/// Responds with the form. On success the amount is cleared and the refreshed history is
/// swapped in out of band. On failure the amount is kept, the error is shown under the
/// form and the history is left alone.
pub async fn create_transaction_endpoint(
    State(state): State<HistoryState>,
    jar: CookieJar,
    Form(form): Form<PayForm>,
) -> Response {
    let theme = Theme::from_jar(&jar);
    let controller = state.controller();
    controller.set_amount(&form.amount);

    let bank = state.bank.clone();
    let account_id = state.account_id.clone();
    let kind = form.transaction_type;
    let outcome = controller
        .submit(move |submission| async move {
            bank.create_transaction(&account_id, kind, submission.amount)
                .await
        })
        .await;

    let page = controller.snapshot();
    controller.unmount();

    let markup = match outcome {
        SubmitOutcome::Completed => {
            tracing::info!("{kind:?} of {} accepted", form.amount.trim());

            html! {
                (pay_form(&page.form.amount, None, page.can_submit()))
                (history_out_of_band(&page, theme, state.timezone))
            }
        }
        _ => {
            let error = page.error.as_ref().map(|error| error.message.as_str());
            pay_form(&page.form.amount, error, page.can_submit())
        }
    };

    markup.into_response()
}

/// Re-render the deposit and withdraw buttons for the current amount.
pub async fn get_pay_controls(
    State(state): State<HistoryState>,
    Form(form): Form<AmountForm>,
) -> Response {
    let controller = state.controller();
    controller.set_amount(&form.amount);

    pay_controls(controller.snapshot().can_submit()).into_response()
}

fn pay_form(amount: &str, error_message: Option<&str>, can_submit: bool) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-sync={ "#" (HISTORY_CONTAINER_ID) ":replace" }
            hx-disinherit="hx-sync"
            hx-disabled-elt="find button"
            class="w-full space-y-4"
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
                    hx-post=(endpoints::TRANSACTION_CONTROLS)
                    hx-trigger="input changed delay:200ms"
                    hx-target={ "#" (PAY_CONTROLS_ID) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (pay_controls(can_submit))

            (form_error(error_message))
        }
    }
}

fn pay_controls(can_submit: bool) -> Markup {
    html! {
        div id=(PAY_CONTROLS_ID) class="flex gap-4"
        {
            button
                type="submit"
                name="transaction_type"
                value="credit"
                disabled[!can_submit]
                aria-label="Depositar valor"
                class=(BUTTON_CREDIT_STYLE)
            {
                span class="idle-label" { "Depositar" }
                span class="htmx-indicator" { "Processando..." }
            }

            button
                type="submit"
                name="transaction_type"
                value="debit"
                disabled[!can_submit]
                aria-label="Sacar valor"
                class=(BUTTON_DEBIT_STYLE)
            {
                span class="idle-label" { "Sacar" }
                span class="htmx-indicator" { "Processando..." }
            }
        }
    }
}
