//! # Script registry
//!
//! Owns the set of dynamically loaded script handlers and dispatches requests
//! to the first one that answers.
//!
//! The registry reacts to file-change notifications from the external
//! watcher: `Created`/`Updated` (re)compile the file through the injected
//! [`ScriptCompiler`], `Deleted` drops the entry. A file that fails to
//! compile stays listed with its error and a sentinel handler that always
//! declines: one broken script never prevents the registry from loading,
//! listing, or dispatching the others, and never crashes the process.
//!
//! Dispatch tries entries in registration order and only advances after the
//! current handler has definitively declined; an asynchronously answering
//! handler is awaited before the next entry is considered. First-match-wins
//! is sequential, never "first to resolve".

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use attrapp_core::{
    Answer, Decline, DynScriptHandler, FileEventKind, Request, ResponseBuilder, ScriptCompiler,
    ScriptContext, ScriptError,
};

/// The injector name the registry tags its answers with.
const INJECTOR_NAME: &str = "script-injector";

/// Configuration for a [`ScriptRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ScriptsConfig {
    /// The registry-wide extended context; every handler invocation receives
    /// a fresh clone of it.
    pub extended: ScriptContext,
}

/// The listed state of one known script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStatus {
    /// The script file.
    pub file: PathBuf,
    /// Whether dispatch may consider this entry.
    pub active: bool,
    /// The last load failure, if the most recent (re)compile failed.
    pub error: Option<String>,
}

/// One `{file, active}` pair for [`ScriptRegistry::set_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryToggle {
    /// The script file to toggle.
    pub file: PathBuf,
    /// The new `active` value.
    pub active: bool,
}

/// The administration view of one entry: a boolean toggle with a
/// human-readable title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOption {
    /// The script file, the toggle's key.
    pub file: PathBuf,
    /// Human-readable title (the file's base name).
    pub title: String,
    /// Status line; embeds the error text when the last load failed.
    pub description: String,
    /// The current `active` value.
    pub value: bool,
}

struct ScriptEntry {
    file: PathBuf,
    active: bool,
    error: Option<String>,
    handler: Arc<dyn DynScriptHandler>,
}

/// Registry of dynamically loaded, hot-reloadable script handlers.
///
/// Entries are kept in registration order; reloads replace an entry's
/// handler/error pair in place (preserving its `active` flag), so dispatch
/// can never observe a partially updated entry.
pub struct ScriptRegistry {
    compiler: Arc<dyn ScriptCompiler>,
    extended: ScriptContext,
    scripts: RwLock<Vec<ScriptEntry>>,
    enabled: AtomicBool,
}

impl ScriptRegistry {
    /// Create an empty registry with the given configuration and compiler
    /// collaborator.
    pub fn new(config: ScriptsConfig, compiler: Arc<dyn ScriptCompiler>) -> Self {
        Self {
            compiler,
            extended: config.extended,
            scripts: RwLock::new(Vec::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// The name this injector tags its answers with.
    pub fn name(&self) -> &'static str {
        INJECTOR_NAME
    }

    /// Whether the registry as a whole participates in dispatch.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Turn the whole registry on or off. Per-entry `active` flags are left
    /// untouched.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// React to a file-change notification from the watching collaborator.
    ///
    /// `Created` and `Updated` trigger a full (re)load; `Deleted` removes the
    /// entry. This operation never fails: a compile error is stored on the
    /// entry, surfaced to diagnostics, and replaced by a declining sentinel
    /// handler.
    pub fn notify_file_event(&self, kind: FileEventKind, file: &Path) {
        match kind {
            FileEventKind::Created | FileEventKind::Updated => self.load(file),
            FileEventKind::Deleted => {
                let mut scripts = self.write_scripts();
                scripts.retain(|entry| entry.file != file);
            }
        }
    }

    fn load(&self, file: &Path) {
        let (handler, error) = match self.compiler.compile(file) {
            Ok(handler) => (handler, None),
            Err(source) => {
                let message = source.to_string();
                let fault = ScriptError::Compile {
                    file: file.to_path_buf(),
                    message: message.clone(),
                };
                tracing::error!(error = %fault, "script failed to compile");
                (Arc::new(Decline) as Arc<dyn DynScriptHandler>, Some(message))
            }
        };

        let mut scripts = self.write_scripts();
        match scripts.iter_mut().find(|entry| entry.file == file) {
            Some(entry) => {
                // Reload in place: `active` survives, handler/error are
                // replaced as a pair.
                entry.handler = handler;
                entry.error = error;
            }
            None => scripts.push(ScriptEntry {
                file: file.to_path_buf(),
                active: true,
                error,
                handler,
            }),
        }
    }

    /// The listed state of every known file, in registration order.
    pub fn entries(&self) -> Vec<EntryStatus> {
        self.read_scripts()
            .iter()
            .map(|entry| EntryStatus {
                file: entry.file.clone(),
                active: entry.active,
                error: entry.error.clone(),
            })
            .collect()
    }

    /// The administration view: one boolean toggle per known file.
    pub fn options(&self) -> Vec<EntryOption> {
        self.read_scripts()
            .iter()
            .map(|entry| {
                let description = match &entry.error {
                    Some(error) => {
                        format!("Status of {}. Error: {error}", entry.file.display())
                    }
                    None => format!("Status of {}.", entry.file.display()),
                };
                EntryOption {
                    file: entry.file.clone(),
                    title: base_name(&entry.file),
                    description,
                    value: entry.active,
                }
            })
            .collect()
    }

    /// Overwrite the `active` flag for each known file in `toggles`.
    ///
    /// Unknown files are silently ignored; administration configuration may
    /// reference stale entries after a delete.
    pub fn set_active<I>(&self, toggles: I)
    where
        I: IntoIterator<Item = EntryToggle>,
    {
        let mut scripts = self.write_scripts();
        for toggle in toggles {
            if let Some(entry) = scripts.iter_mut().find(|entry| entry.file == toggle.file) {
                entry.active = toggle.active;
            }
        }
    }

    /// Dispatch a request to the first active handler that answers.
    ///
    /// Returns `None` when no active handler answers, a miss for the
    /// caller. A faulting handler is surfaced to diagnostics and treated as
    /// a decline for this request.
    pub async fn dispatch(&self, req: &Request) -> Option<Answer> {
        if !self.is_enabled() {
            return None;
        }

        // Snapshot under the read lock, then release it before awaiting any
        // handler: a stalled script must not block reloads or toggles.
        let snapshot: Vec<(PathBuf, Arc<dyn DynScriptHandler>)> = self
            .read_scripts()
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| (entry.file.clone(), Arc::clone(&entry.handler)))
            .collect();

        for (file, handler) in snapshot {
            let builder = ResponseBuilder::new(req.url.clone(), self.name(), file.clone());
            let ctx = self.extended.clone();

            match handler.handle_dyn(ctx, req, &builder).await {
                Ok(Some(answer)) => return Some(answer),
                Ok(None) => {}
                Err(source) => {
                    let fault = ScriptError::Execution { file, source };
                    tracing::warn!(error = %fault, "script fault treated as a decline");
                }
            }
        }

        None
    }

    fn read_scripts(&self) -> RwLockReadGuard<'_, Vec<ScriptEntry>> {
        // A poisoned lock only ever guards fully written entries; recover the
        // guard instead of propagating the panic.
        self.scripts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_scripts(&self) -> RwLockWriteGuard<'_, Vec<ScriptEntry>> {
        self.scripts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn base_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}
