//! Testing utilities for attrapp.
//!
//! This module provides canned scripts and a stub compiler so the registry
//! can be exercised without a real script engine.
//!
//! # Features
//!
//! - [`StaticScript`]: answers every request with fixed parts
//! - [`FaultScript`]: always fails, for fault-isolation tests
//! - [`CountingScript`]: counts invocations, optionally answering
//! - [`ScriptTable`]: a stub [`ScriptCompiler`] mapping files to canned
//!   handlers or compile failures

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use attrapp_core::{
    BoxError, DynScriptHandler, HandlerOutcome, ReplyParts, Request, ResponseBuilder,
    ScriptCompiler, ScriptContext, ScriptHandler,
};

// ============================================================================
// Static Script
// ============================================================================

/// A script that answers every request with the same parts.
///
/// # Example
///
/// ```rust,ignore
/// let script = StaticScript::with_content("hello");
/// table.insert("greet.js", script);
/// ```
#[derive(Debug, Clone)]
pub struct StaticScript {
    parts: ReplyParts,
}

impl StaticScript {
    /// Create a script answering with the given parts.
    pub fn new(parts: ReplyParts) -> Self {
        Self { parts }
    }

    /// Create a script answering `200` with the given body.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::new(ReplyParts {
            content: content.into(),
            ..ReplyParts::default()
        })
    }
}

impl ScriptHandler for StaticScript {
    async fn handle(
        &self,
        _ctx: ScriptContext,
        _req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        Ok(Some(builder.answer(self.parts.clone())))
    }
}

// ============================================================================
// Fault Script
// ============================================================================

/// A script that fails on every invocation.
///
/// Dispatch should surface the fault to diagnostics and move on to the next
/// entry.
#[derive(Debug, Clone)]
pub struct FaultScript {
    message: String,
}

impl FaultScript {
    /// Create a script failing with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ScriptHandler for FaultScript {
    async fn handle(
        &self,
        _ctx: ScriptContext,
        _req: &Request,
        _builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        Err(BoxError::from(self.message.clone()))
    }
}

// ============================================================================
// Counting Script
// ============================================================================

/// A script that counts its invocations.
///
/// Clones share the counter, so a test can keep one clone and hand the other
/// to the registry.
///
/// # Example
///
/// ```rust,ignore
/// let script = CountingScript::declining();
/// let probe = script.clone();
///
/// // dispatch through the registry...
/// assert_eq!(probe.calls(), 1);
/// ```
pub struct CountingScript {
    calls: Arc<AtomicUsize>,
    parts: Option<ReplyParts>,
}

impl CountingScript {
    /// A counting script that declines every request.
    pub fn declining() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            parts: None,
        }
    }

    /// A counting script that answers every request with the given parts.
    pub fn answering(parts: ReplyParts) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            parts: Some(parts),
        }
    }

    /// How many times the script has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Clone for CountingScript {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            parts: self.parts.clone(),
        }
    }
}

impl ScriptHandler for CountingScript {
    async fn handle(
        &self,
        _ctx: ScriptContext,
        _req: &Request,
        builder: &ResponseBuilder,
    ) -> HandlerOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.parts.clone().map(|parts| builder.answer(parts)))
    }
}

// ============================================================================
// Script Table
// ============================================================================

enum TableEntry {
    Compiled(Arc<dyn DynScriptHandler>),
    Fails(String),
}

/// A stub [`ScriptCompiler`] backed by an in-memory table.
///
/// Tests register canned handlers (or canned failures) per file, then drive
/// the registry with file events; changing the table between events models a
/// reload with new source.
///
/// # Example
///
/// ```rust,ignore
/// let table = Arc::new(ScriptTable::new());
/// table.insert("good.js", StaticScript::with_content("ok"));
/// table.insert_failing("bad.js", "unexpected token");
///
/// let registry = ScriptRegistry::new(ScriptsConfig::default(), table.clone());
/// registry.notify_file_event(FileEventKind::Created, Path::new("good.js"));
/// ```
#[derive(Default)]
pub struct ScriptTable {
    entries: Mutex<HashMap<PathBuf, TableEntry>>,
}

impl ScriptTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for the given file.
    pub fn insert(&self, file: impl Into<PathBuf>, handler: impl ScriptHandler) {
        self.entries
            .lock()
            .unwrap()
            .insert(file.into(), TableEntry::Compiled(Arc::new(handler)));
    }

    /// Register a compile failure for the given file.
    pub fn insert_failing(&self, file: impl Into<PathBuf>, message: impl Into<String>) {
        self.entries
            .lock()
            .unwrap()
            .insert(file.into(), TableEntry::Fails(message.into()));
    }

    /// Forget the given file.
    pub fn remove(&self, file: &Path) {
        self.entries.lock().unwrap().remove(file);
    }
}

impl ScriptCompiler for ScriptTable {
    fn compile(&self, file: &Path) -> Result<Arc<dyn DynScriptHandler>, BoxError> {
        match self.entries.lock().unwrap().get(file) {
            Some(TableEntry::Compiled(handler)) => Ok(Arc::clone(handler)),
            Some(TableEntry::Fails(message)) => Err(BoxError::from(message.clone())),
            None => Err(BoxError::from(format!(
                "no script registered for {}",
                file.display()
            ))),
        }
    }
}
