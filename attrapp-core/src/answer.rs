//! Answer model.
//!
//! An [`Answer`] is the protocol-shaped response a script produces for a
//! request. Answers carry provenance metadata ([`AnswerOrigin`]) so the
//! recorder and diagnostics can attribute them to the script that produced
//! them.

use std::path::PathBuf;

use crate::request::Headers;

/// Status line of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Numeric status code.
    pub code: u16,
    /// Free-form status text; empty when the code speaks for itself.
    pub text: String,
}

/// Provenance of an answer: which injector and which script file produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOrigin {
    /// Name of the injector that dispatched the request.
    pub injector: String,
    /// The script file whose handler produced the answer.
    pub file: PathBuf,
}

/// A fully formed answer to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Url of the request this answer was produced for.
    pub url: String,
    /// Status line.
    pub status: Status,
    /// Answer headers.
    pub headers: Headers,
    /// Answer body.
    pub content: String,
    /// Where this answer came from; `None` for answers built outside any
    /// injector (e.g. synthesized by the outer server).
    pub origin: Option<AnswerOrigin>,
}
