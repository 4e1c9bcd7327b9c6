//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    history::get_transaction_history,
    home_page::get_home_page,
    not_found::get_404_not_found,
    pay_page::{create_transaction_endpoint, get_pay_controls, get_pay_page},
    theme::toggle_theme,
    transfer_page::{create_transfer_endpoint, get_transfer_controls, get_transfer_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::PAY_VIEW, get(get_pay_page))
        .route(endpoints::TRANSFER_VIEW, get(get_transfer_page));

    // These routes return fragments that htmx swaps into the pages above.
    let fragment_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transaction_history).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION_CONTROLS, post(get_pay_controls))
        .route(endpoints::TRANSFERS_API, post(create_transfer_endpoint))
        .route(endpoints::TRANSFER_CONTROLS, post(get_transfer_controls))
        .route(endpoints::THEME_API, post(toggle_theme));

    page_routes
        .merge(fragment_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
