//! Error types for attrapp.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`AttrappError`] - Top-level error type for all attrapp operations
//! - [`ScriptError`] - Errors from loading or running a script
//! - [`RecorderError`] - Errors from recorder notification delivery
//!
//! Every failure here recovers locally: compile errors are stored on the
//! owning entry, handler faults become declines, listener failures are
//! isolated per listener. Nothing in this hierarchy is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::RecordKind;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all attrapp operations.
#[derive(Error, Debug)]
pub enum AttrappError {
    /// An error occurred while loading or running a script.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// An error occurred while delivering a recorder notification.
    #[error("recorder error: {0}")]
    Recorder(#[from] RecorderError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised by a script file, at load time or while answering.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script's source failed to compile into a handler.
    #[error("failed to compile {}: {message}", .file.display())]
    Compile {
        /// The offending script file.
        file: PathBuf,
        /// The compiler's diagnostic.
        message: String,
    },

    /// The compiled handler failed while answering a request.
    #[error("script {} failed while answering", .file.display())]
    Execution {
        /// The offending script file.
        file: PathBuf,
        /// The underlying handler error.
        #[source]
        source: BoxError,
    },
}

/// Errors raised while notifying recorder subscribers.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// A subscribed listener returned an error.
    #[error("{kind} listener failed")]
    Listener {
        /// Which notification kind the listener was subscribed to.
        kind: RecordKind,
        /// The listener's error.
        #[source]
        source: BoxError,
    },
}

// Convenience conversions
impl From<BoxError> for AttrappError {
    fn from(err: BoxError) -> Self {
        AttrappError::Custom(err)
    }
}
