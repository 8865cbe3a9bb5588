//! Recorded audit entries.
//!
//! Every request/response cycle the server completes ends up in one of three
//! in-memory logs: hits (a script answered), misses (no script answered), and
//! messages (inter-party notices unrelated to a request/response pair).
//! Entries are immutable once appended and leave a log only through capacity
//! eviction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::answer::Answer;
use crate::request::Request;

/// The three kinds of recorded entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A dispatch cycle that produced an answer.
    Hit,
    /// A dispatch cycle no handler answered.
    Miss,
    /// An inter-party informational message.
    Message,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// A successfully answered request.
#[derive(Debug, Clone)]
pub struct RecordedHit {
    /// Unique identity of this entry.
    pub id: Uuid,
    /// When the underlying operation started.
    pub start: DateTime<Utc>,
    /// When the underlying operation finished.
    pub end: DateTime<Utc>,
    /// The original request.
    pub request: Request,
    /// The answer that was produced.
    pub response: Answer,
}

/// A request no active handler answered.
#[derive(Debug, Clone)]
pub struct RecordedMiss {
    /// Unique identity of this entry.
    pub id: Uuid,
    /// When the underlying operation started.
    pub start: DateTime<Utc>,
    /// When the underlying operation finished.
    pub end: DateTime<Utc>,
    /// The original request.
    pub request: Request,
}

/// An inter-party informational message.
#[derive(Debug, Clone)]
pub struct RecordedMessage {
    /// Unique identity of this entry.
    pub id: Uuid,
    /// When the message was observed.
    pub time: DateTime<Utc>,
    /// Free-form message content.
    pub content: String,
    /// Sender identity.
    pub from: String,
    /// Recipient identity.
    pub to: String,
}

/// Payload of an inter-party message, before the recorder assigns identity.
#[derive(Debug, Clone)]
pub struct MessageData {
    /// Free-form message content.
    pub content: String,
    /// Sender identity.
    pub from: String,
    /// Recipient identity.
    pub to: String,
}
