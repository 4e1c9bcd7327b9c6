//! The home page: a short checklist under the bank's name.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    theme::Theme,
};

const CHECKLIST_ITEMS: [&str; 3] = ["Item 1", "Item 2", "Item 3"];

/// Render the home page.
///
/// The page has no remote data. The checklist is plain checkboxes the browser keeps track of.
pub async fn get_home_page(jar: CookieJar) -> Response {
    base("Início", endpoints::ROOT, Theme::from_jar(&jar), &home_view()).into_response()
}

fn home_view() -> Markup {
    html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-semibold" { "Lista de Itens" }

            ul class="flex flex-col gap-2.5"
            {
                @for (index, item) in CHECKLIST_ITEMS.iter().enumerate() {
                    li class="flex items-center gap-2.5"
                    {
                        input
                            id={ "item-" (index + 1) }
                            type="checkbox"
                            class="w-4 h-4 accent-blue-600";
                        label for={ "item-" (index + 1) } { (item) }
                    }
                }
            }
        }

        footer
            class="mt-auto px-6 py-4 text-center text-sm border-t-2
                border-gray-200 dark:border-gray-700 text-gray-700 dark:text-gray-300"
        {
            p { "© 2025 Horizon Bank - Todos os direitos reservados" }
        }
    }
}
