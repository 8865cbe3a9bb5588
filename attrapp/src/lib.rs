//! # attrapp - Pluggable Request-Handling Core
//!
//! `attrapp` is the request-handling core of a mock/proxy server: a registry
//! of dynamically loaded, hot-reloadable script handlers that are tried in
//! order until one answers a request, plus a bounded, observable audit log of
//! every hit, miss, and inter-party message the server processes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attrapp::{FileEventKind, Recorder, ScriptRegistry, ScriptsConfig};
//!
//! let registry = ScriptRegistry::new(ScriptsConfig::default(), compiler);
//! registry.notify_file_event(FileEventKind::Created, Path::new("hello.js"));
//!
//! if let Some(answer) = registry.dispatch(&request).await {
//!     recorder.hit(start, Utc::now(), request, answer);
//! } else {
//!     recorder.miss(start, Utc::now(), request);
//! }
//! ```
//!
//! The outer server owns the file watcher, the script engine, and the HTTP
//! transport; they plug in through the seams in `attrapp-core`
//! ([`ScriptCompiler`], [`FileEventKind`], [`ScriptHandler`]).

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use attrapp_core::{
    // Answers
    Answer,
    AnswerOrigin,
    // Errors
    AttrappError,
    BoxError,
    // Script capability
    Decline,
    DynScriptHandler,
    FileEventKind,
    HandlerOutcome,
    Headers,
    // Recorded entries
    MessageData,
    RecordKind,
    RecordedHit,
    RecordedMessage,
    RecordedMiss,
    RecorderError,
    ReplyParts,
    // Requests
    Request,
    ResponseBuilder,
    ScriptCompiler,
    // Context
    ScriptContext,
    ScriptError,
    ScriptHandler,
    ScriptValue,
    Status,
};

pub mod recorder;
pub mod registry;
pub mod testing;

#[cfg(feature = "timeout")]
pub mod timeout;

pub use recorder::Recorder;
pub use registry::{EntryOption, EntryStatus, EntryToggle, ScriptRegistry, ScriptsConfig};

/// Prelude module - common imports for attrapp.
///
/// # Usage
///
/// ```rust,ignore
/// use attrapp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Answer, BoxError, FileEventKind, HandlerOutcome, Recorder, ReplyParts, Request,
        ResponseBuilder, ScriptCompiler, ScriptContext, ScriptHandler, ScriptRegistry,
        ScriptsConfig,
    };
}
