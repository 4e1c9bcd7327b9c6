use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let value = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        value, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {value:?}"
    );
}

/// Assert that `html` has an input named `name` holding `value`.
#[track_caller]
pub(crate) fn assert_input_value(html: &Html, name: &str, value: &str) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = html
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));
    let got = input.value().attr("value").unwrap_or_default();

    assert_eq!(got, value, "want input {name} with value {value:?}, got {got:?}");
}

/// The submit buttons in `html` and whether each is disabled, in document order.
pub(crate) fn submit_buttons(html: &Html) -> Vec<(String, bool)> {
    html.select(&Selector::parse("button[type=submit]").unwrap())
        .map(|button| {
            (
                button.value().attr("value").unwrap_or_default().to_owned(),
                button.value().attr("disabled").is_some(),
            )
        })
        .collect()
}

/// The text of the form error in `html`, if there is one.
pub(crate) fn form_error_message(html: &Html) -> Option<String> {
    html.select(&Selector::parse("p#form-error").unwrap())
        .next()
        .map(|p| p.text().collect::<String>().trim().to_owned())
}

/// Assert that submitting the form in `html` aborts a history read still in flight, and
/// that a history read started during a submit is dropped.
#[track_caller]
pub(crate) fn assert_submit_replaces_history_read(html: &Html) {
    let form = must_get_form(html);
    assert_eq!(form.value().attr("hx-sync"), Some("#history:replace"));
    assert_eq!(
        form.value().attr("hx-disinherit"),
        Some("hx-sync"),
        "the controls requests inside the form must not abort the history read"
    );

    let history = html
        .select(&Selector::parse("#history[hx-get]").unwrap())
        .next()
        .expect("No history container found");
    assert_eq!(history.value().attr("hx-sync"), Some("this:drop"));
}
