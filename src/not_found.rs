use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{html::error_view, theme::Theme};

/// The page served for any path without a route.
pub async fn get_404_not_found(jar: CookieJar) -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Página não encontrada",
            "404",
            "Não encontramos a página que você procura.",
            Theme::from_jar(&jar),
        ),
    )
        .into_response()
}
