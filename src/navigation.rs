//! This file defines the side menu shown on every page.

use maud::{Markup, html};

use crate::endpoints;

/// A link in the side menu.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    icon: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "flex items-center gap-3 p-4 rounded-lg bg-gray-700 text-white font-medium"
        } else {
            "flex items-center gap-3 p-4 rounded-lg text-gray-200 font-medium \
            hover:bg-gray-800 hover:text-white transition-colors"
        };

        html! {
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                span class="w-10 text-center text-xl" aria-hidden="true" { (self.icon) }
                span class="hidden md:inline" { (self.title) }
            }
        }
    }
}

fn links(active_endpoint: &str) -> Vec<Link<'_>> {
    [
        (endpoints::ROOT, "Início", "⌂"),
        (endpoints::PAY_VIEW, "Saque/Depósito", "$"),
        (endpoints::TRANSFER_VIEW, "Transferências", "⇄"),
    ]
    .into_iter()
    .map(|(url, title, icon)| Link {
        url,
        title,
        icon,
        is_current: active_endpoint == url,
    })
    .collect()
}

/// The side menu with the link for `active_endpoint` highlighted.
///
/// The labels collapse to icons on narrow screens.
pub fn side_menu(active_endpoint: &str) -> Markup {
    html! {
        nav
            class="w-20 md:w-64 min-h-screen p-2.5 flex flex-col justify-center
                bg-neutral-900 shadow-lg transition-all"
        {
            ul class="flex flex-col gap-2.5"
            {
                @for link in links(active_endpoint) {
                    li { (link.into_html()) }
                }
            }
        }
    }
}
