use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
pub(crate) fn assert_html_content_type(response: &Response<Body>) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, "text/html; charset=utf-8");
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> Option<String> {
    response.headers().get(header_name).map(|value| {
        value
            .to_str()
            .expect("Could not convert to str")
            .to_string()
    })
}
