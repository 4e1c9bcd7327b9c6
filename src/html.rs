use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{endpoints, navigation::side_menu, theme::Theme};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-gray-400 disabled:cursor-not-allowed \
    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_CREDIT_STYLE: &str = "w-full px-4 py-2 bg-green-600 \
    disabled:bg-gray-400 disabled:cursor-not-allowed hover:enabled:bg-green-700 \
    text-white rounded";

pub const BUTTON_DEBIT_STYLE: &str = "w-full px-4 py-2 bg-red-600 \
    disabled:bg-gray-400 disabled:cursor-not-allowed hover:enabled:bg-red-700 \
    text-white rounded";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "w-full max-w-md space-y-4 p-6 rounded-lg \
    bg-white dark:bg-gray-800 shadow";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_ERROR_STYLE: &str = "text-red-600 dark:text-red-400";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex-1 flex flex-col gap-6 px-6 py-8 text-gray-900 dark:text-white";

/// The full HTML document: side menu, header with the dark mode switch, and `content`.
pub fn base(title: &str, active_endpoint: &str, theme: Theme, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" class=[theme.html_class()]
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Horizon Bank" }

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                style type="text/tailwindcss"
                {
                    (PreEscaped("@custom-variant dark (&:where(.dark, .dark *));"))
                }
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}

                style
                {
                    r#"
                    .htmx-indicator {
                        display: none;
                    }

                    .htmx-request .htmx-indicator,
                    .htmx-request.htmx-indicator {
                        display: inline;
                    }

                    .htmx-request .idle-label {
                        display: none;
                    }
                    "#
                }

                script src={ (endpoints::STATIC) "/app.js" } defer {}
            }

            body class="min-h-screen flex bg-gray-50 dark:bg-gray-900 transition-colors"
            {
                (side_menu(active_endpoint))

                div class="flex-1 flex flex-col"
                {
                    header
                        class="flex justify-between items-center px-6 py-4
                            border-b-2 border-gray-200 dark:border-gray-700
                            text-gray-900 dark:text-white"
                    {
                        h1 class="text-2xl font-bold" { (title) }
                        (theme.switch())
                    }

                    (content)
                }
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, theme: Theme) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
        {
            div class="mx-auto max-w-screen-sm text-center"
            {
                p
                    class="mb-4 text-7xl tracking-tight font-extrabold
                        lg:text-9xl text-blue-600 dark:text-blue-500"
                {
                    (header)
                }

                p
                    class="mb-4 text-3xl md:text-4xl tracking-tight
                        font-bold text-gray-900 dark:text-white"
                {
                    (description)
                }

                a
                    href=(endpoints::ROOT)
                    class="inline-flex text-white bg-blue-600
                        hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                        focus:ring-blue-300 font-medium rounded text-sm px-5
                        py-2.5 text-center dark:focus:ring-blue-900 my-4"
                {
                    "Voltar para o início"
                }
            }
        }
    );

    base(title, "", theme, &content)
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline w-8 h-8 text-blue-600 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// Format `amount` in BRL with exactly two decimal places and no digit grouping,
/// e.g. "R$ 1234.50".
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-R$ {:.2}", amount.abs())
    } else {
        format!("R$ {amount:.2}")
    }
}

/// The error message under a form, if there is one.
pub fn form_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p id="form-error" class=(FORM_ERROR_STYLE) role="alert" { (message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn currency_has_two_decimals_and_no_grouping() {
        assert_eq!(format_currency(200.0), "R$ 200.00");
        assert_eq!(format_currency(100.5), "R$ 100.50");
        assert_eq!(format_currency(1234567.891), "R$ 1234567.89");
        assert_eq!(format_currency(0.0), "R$ 0.00");
        assert_eq!(format_currency(-10.0), "-R$ 10.00");
    }

    #[test]
    fn formatted_currency_parses_back_to_the_same_value() {
        let amount = 100.5;

        let formatted = format_currency(amount);
        let parsed: f64 = formatted.trim_start_matches("R$ ").parse().unwrap();

        assert_eq!(formatted, "R$ 100.50");
        assert_eq!(parsed, amount);
    }
}
