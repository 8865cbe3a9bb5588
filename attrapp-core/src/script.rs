//! # Script capability layer
//!
//! The seams between the dispatch core and its external collaborators.
//!
//! A script file, once compiled by the [`ScriptCompiler`] collaborator,
//! becomes a [`ScriptHandler`]: a callable that receives a context copy, the
//! incoming request, and a response builder, and either answers, declines, or
//! faults. The registry depends only on these traits, never on how
//! compilation happens, so tests can swap the compiler for a stub table.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`ScriptHandler`] uses native `async fn` for static dispatch. For runtime
//! polymorphism (the registry stores handlers as trait objects), use
//! [`DynScriptHandler`]; every `ScriptHandler` implements it automatically.

use std::path::Path;
use std::sync::Arc;
use std::{future::Future, pin::Pin};

use crate::answer::Answer;
use crate::context::ScriptContext;
use crate::error::BoxError;
use crate::request::Request;
use crate::response::ResponseBuilder;

/// Result of one handler invocation.
///
/// - `Ok(Some(answer))`: the script answered; dispatch stops here.
/// - `Ok(None)`: the script declined; dispatch moves to the next entry.
/// - `Err(_)`: the script faulted; dispatch logs the fault and treats it as
///   a decline for this request.
pub type HandlerOutcome = Result<Option<Answer>, BoxError>;

/// A compiled script handler.
///
/// Handlers may answer synchronously or take their time: dispatch awaits the
/// returned future to completion before considering the next entry, so
/// first-match-wins stays sequential.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ScriptHandler`",
    label = "missing `ScriptHandler` implementation",
    note = "Script handlers must implement the `handle` method."
)]
pub trait ScriptHandler: Send + Sync + 'static {
    /// Called with a fresh context copy, the incoming request, and a builder
    /// scoped to this request and this script's file.
    fn handle(
        &self,
        ctx: ScriptContext,
        req: &Request,
        builder: &ResponseBuilder,
    ) -> impl Future<Output = HandlerOutcome> + Send;
}

/// Dynamic object-safe version of [`ScriptHandler`].
///
/// Use this trait when you need runtime polymorphism (e.g., in the registry).
pub trait DynScriptHandler: Send + Sync + 'static {
    /// Called when a request is dispatched (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        ctx: ScriptContext,
        req: &'a Request,
        builder: &'a ResponseBuilder,
    ) -> Pin<Box<dyn Future<Output = HandlerOutcome> + Send + 'a>>;
}

// Blanket implementation: any ScriptHandler implements DynScriptHandler.
impl<T: ScriptHandler> DynScriptHandler for T {
    fn handle_dyn<'a>(
        &'a self,
        ctx: ScriptContext,
        req: &'a Request,
        builder: &'a ResponseBuilder,
    ) -> Pin<Box<dyn Future<Output = HandlerOutcome> + Send + 'a>> {
        Box::pin(self.handle(ctx, req, builder))
    }
}

/// A handler that declines every request.
///
/// Installed as the sentinel for entries whose script failed to compile: the
/// entry stays listed and toggleable, but never answers until a later reload
/// succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decline;

impl ScriptHandler for Decline {
    async fn handle(
        &self,
        _ctx: ScriptContext,
        _req: &Request,
        _builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        Ok(None)
    }
}

/// The script-compiling collaborator.
///
/// Turns a file's contents into a callable handler. Compilation is
/// synchronous, fails with a diagnostic error on invalid source, and never
/// partially succeeds.
pub trait ScriptCompiler: Send + Sync {
    /// Compile the given file into a handler.
    fn compile(&self, file: &Path) -> Result<Arc<dyn DynScriptHandler>, BoxError>;
}

/// File-change notifications consumed from the file-watching collaborator.
///
/// Delivery is at-least-once; `Created` and `Updated` are treated
/// identically (full reload).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// The file appeared.
    Created,
    /// The file's contents changed.
    Updated,
    /// The file was removed.
    Deleted,
}
