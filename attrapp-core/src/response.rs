//! Response construction.
//!
//! Scripts build answers through a [`ResponseBuilder`] instead of assembling
//! [`Answer`] records by hand. The builder is a single-call factory scoped to
//! one request and one script file: it fills in the request url and tags the
//! answer with its provenance, so scripts only supply the fields they care
//! about.

use std::path::PathBuf;

use crate::answer::{Answer, AnswerOrigin, Status};
use crate::request::Headers;

/// The overridable parts of an answer.
///
/// Every field has a default (`200` / empty), so scripts use struct-update
/// syntax to set just what differs:
///
/// ```rust,ignore
/// builder.answer(ReplyParts {
///     status_code: 404,
///     ..ReplyParts::default()
/// })
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyParts {
    /// Status code; defaults to `200`.
    pub status_code: u16,
    /// Status text; defaults to empty.
    pub status_text: String,
    /// Answer headers; default to empty.
    pub headers: Headers,
    /// Answer body; defaults to empty.
    pub content: String,
}

impl Default for ReplyParts {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_text: String::new(),
            headers: Headers::new(),
            content: String::new(),
        }
    }
}

/// A per-dispatch answer factory.
///
/// The registry creates one builder per handler invocation, scoped to the
/// request's url and the entry's file identity. Building an answer has no
/// side effects.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    url: String,
    injector: String,
    file: PathBuf,
}

impl ResponseBuilder {
    /// Create a builder scoped to one request and one script file.
    pub fn new(
        url: impl Into<String>,
        injector: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            url: url.into(),
            injector: injector.into(),
            file: file.into(),
        }
    }

    /// The url the produced answers will carry.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The script file answers built here are attributed to.
    pub fn file(&self) -> &std::path::Path {
        &self.file
    }

    /// Build a fully formed answer from the given parts.
    pub fn answer(&self, parts: ReplyParts) -> Answer {
        Answer {
            url: self.url.clone(),
            status: Status {
                code: parts.status_code,
                text: parts.status_text,
            },
            headers: parts.headers,
            content: parts.content,
            origin: Some(AnswerOrigin {
                injector: self.injector.clone(),
                file: self.file.clone(),
            }),
        }
    }
}
