//! The dark mode switch and the cookie that remembers it.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use axum_htmx::HxRefresh;
use maud::{Markup, html};

use crate::endpoints;

/// The name of the cookie holding the selected theme.
pub const THEME_COOKIE: &str = "theme";

/// The colour scheme pages are rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the theme from the request cookies, defaulting to [Theme::Light].
    pub fn from_jar(jar: &CookieJar) -> Self {
        match jar.get(THEME_COOKIE) {
            Some(cookie) if cookie.value() == "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The value stored in the theme cookie.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The class that switches on the `dark:` styles, if any.
    pub fn html_class(self) -> Option<&'static str> {
        self.is_dark().then_some("dark")
    }

    /// The dark mode switch shown in the page header.
    pub fn switch(self) -> Markup {
        let track_style = if self.is_dark() {
            "relative w-12 h-6 rounded-full bg-gray-600 transition-colors"
        } else {
            "relative w-12 h-6 rounded-full bg-gray-300 transition-colors"
        };
        let knob_style = if self.is_dark() {
            "absolute top-0.5 left-6 w-5 h-5 rounded-full bg-white shadow transition-all"
        } else {
            "absolute top-0.5 left-0.5 w-5 h-5 rounded-full bg-white shadow transition-all"
        };

        html! {
            button
                type="button"
                id="dark-mode-switch"
                hx-post=(endpoints::THEME_API)
                role="switch"
                aria-checked=(if self.is_dark() { "true" } else { "false" })
                class="flex items-center gap-3 cursor-pointer"
            {
                span { "Dark Mode" }
                span class=(track_style) { span class=(knob_style) {} }
            }
        }
    }
}

/// Flip the theme cookie and have htmx reload the page with the new theme.
pub async fn toggle_theme(jar: CookieJar) -> Response {
    let theme = Theme::from_jar(&jar).toggled();
    let cookie = Cookie::build((THEME_COOKIE, theme.as_str()))
        .path("/")
        .permanent();

    (HxRefresh(true), jar.add(cookie)).into_response()
}
