//! Incoming request model.

use std::collections::BTreeMap;

/// Ordered name/value mapping used for headers and query parameters.
///
/// A `BTreeMap` keeps iteration deterministic, so listings and recorded
/// entries render in a stable order.
pub type Headers = BTreeMap<String, String>;

/// An incoming request as seen by the dispatch pipeline.
///
/// The outer server owns parsing; by the time a request reaches the script
/// registry it is a plain record. Scripts receive it by reference and must not
/// need to mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method, e.g. `GET`.
    pub method: String,
    /// Request url (path and target as the outer server resolved it).
    pub url: String,
    /// Parsed query parameters.
    pub query: Headers,
    /// Request headers.
    pub headers: Headers,
    /// Raw request body.
    pub content: String,
}

impl Request {
    /// Create a request with the given method and url and no further data.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            query: Headers::new(),
            headers: Headers::new(),
            content: String::new(),
        }
    }

    /// Convenience constructor for a bare `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }
}
