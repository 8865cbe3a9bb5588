//! Response builder defaults, overrides, and provenance.

use std::path::Path;

use attrapp::{Headers, ReplyParts, ResponseBuilder};

mod common;
use common::request;

#[test]
fn defaults_fill_every_omitted_field() {
    let builder = ResponseBuilder::new("/api", "script-injector", "a.js");
    let answer = builder.answer(ReplyParts::default());

    assert_eq!(answer.status.code, 200);
    assert_eq!(answer.status.text, "");
    assert!(answer.headers.is_empty());
    assert_eq!(answer.content, "");
}

#[test]
fn each_field_is_independently_overridable() {
    let builder = ResponseBuilder::new("/api", "script-injector", "a.js");

    let not_found = builder.answer(ReplyParts {
        status_code: 404,
        status_text: "Not Found".to_string(),
        ..ReplyParts::default()
    });
    assert_eq!(not_found.status.code, 404);
    assert_eq!(not_found.status.text, "Not Found");
    assert_eq!(not_found.content, "", "untouched fields keep their defaults");

    let mut headers = Headers::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    let json = builder.answer(ReplyParts {
        headers,
        content: "{}".to_string(),
        ..ReplyParts::default()
    });
    assert_eq!(json.status.code, 200);
    assert_eq!(
        json.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(json.content, "{}");
}

#[test]
fn answers_are_scoped_to_the_request_and_script() {
    let req = request("/users/42");
    let builder = ResponseBuilder::new(req.url.clone(), "script-injector", "users.js");
    let answer = builder.answer(ReplyParts::default());

    assert_eq!(answer.url, "/users/42");
    let origin = answer.origin.expect("builder answers carry provenance");
    assert_eq!(origin.injector, "script-injector");
    assert_eq!(origin.file, Path::new("users.js"));
}
