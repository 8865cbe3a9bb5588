//! # attrapp-core
//!
//! Core types and capability seams for the attrapp mock-server core.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! script engines and extensions that don't need the full `attrapp`
//! implementation. It defines:
//!
//! - The request/answer data model ([`Request`], [`Answer`], [`ReplyParts`],
//!   [`ResponseBuilder`])
//! - The script capability seams ([`ScriptHandler`], [`DynScriptHandler`],
//!   [`ScriptCompiler`], [`FileEventKind`])
//! - The script context value model ([`ScriptValue`], [`ScriptContext`])
//! - The recorded audit entries ([`RecordedHit`], [`RecordedMiss`],
//!   [`RecordedMessage`])
//! - The error hierarchy ([`AttrappError`], [`ScriptError`],
//!   [`RecorderError`])
//!
//! The implementation of the registry and the recorder lives in the
//! `attrapp` crate.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod answer;
mod context;
mod error;
mod record;
mod request;
mod response;
mod script;

// Re-exports
pub use answer::{Answer, AnswerOrigin, Status};
pub use context::{ScriptContext, ScriptValue};
pub use error::{AttrappError, BoxError, RecorderError, ScriptError};
pub use record::{MessageData, RecordKind, RecordedHit, RecordedMessage, RecordedMiss};
pub use request::{Headers, Request};
pub use response::{ReplyParts, ResponseBuilder};
pub use script::{
    Decline, DynScriptHandler, FileEventKind, HandlerOutcome, ScriptCompiler, ScriptHandler,
};
