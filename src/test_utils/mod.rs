#![allow(missing_docs)]

pub(crate) mod bank;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use bank::{FakeBank, account_record, deposit_record};
pub(crate) use form::{
    assert_hx_endpoint, assert_input_value, assert_submit_replaces_history_read,
    form_error_message, must_get_form, submit_buttons,
};
pub(crate) use html::{
    assert_valid_html, element_text, parse_html_document, parse_html_fragment, select_all,
};
pub(crate) use http::{assert_html_content_type, assert_status_ok, get_header};
