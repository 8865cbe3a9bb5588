//! Deadline wrapper for script handlers.
//!
//! The core dispatch contract does not impose timeouts: a handler that never
//! resolves stalls its own request indefinitely. Callers that want a bound
//! wrap handlers in [`TimeoutScript`] before registering them.

use std::time::Duration;

use attrapp_core::{HandlerOutcome, Request, ResponseBuilder, ScriptContext, ScriptHandler};
use tokio::time::timeout;

/// Error produced when a wrapped script misses its deadline.
#[derive(Debug, Clone)]
pub struct ScriptTimedOut;

impl std::fmt::Display for ScriptTimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "script answer timed out")
    }
}

impl std::error::Error for ScriptTimedOut {}

/// A script handler that wraps another handler with a deadline.
///
/// An elapsed deadline surfaces as a handler fault, which dispatch treats as
/// a decline for that request.
pub struct TimeoutScript<H> {
    inner: H,
    deadline: Duration,
}

impl<H> TimeoutScript<H> {
    /// Wrap `inner` with the given deadline.
    pub fn new(inner: H, deadline: Duration) -> Self {
        Self { inner, deadline }
    }
}

impl<H: ScriptHandler> ScriptHandler for TimeoutScript<H> {
    async fn handle(
        &self,
        ctx: ScriptContext,
        req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        match timeout(self.deadline, self.inner.handle(ctx, req, builder)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Box::new(ScriptTimedOut)),
        }
    }
}
