//! # Recorder
//!
//! Append-only, capacity-bounded, observable audit trail.
//!
//! The recorder owns three independent time-ordered logs (hits, misses, and
//! inter-party messages), each bounded by a fixed capacity with FIFO
//! eviction, plus one listener list per log. Appends are ordered by call
//! arrival and carry the true start/end timestamps of the underlying
//! operation, not the time of recording.
//!
//! Listener delivery is synchronous and in subscription order. A failing
//! listener is isolated: the append stands, the remaining listeners still
//! run, and the failure goes to the diagnostics channel instead of the
//! record caller.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use attrapp_core::{
    Answer, BoxError, MessageData, RecordKind, RecordedHit, RecordedMessage, RecordedMiss,
    RecorderError, Request,
};

type Listener<T> = Arc<dyn Fn(&T) -> Result<(), BoxError> + Send + Sync>;

/// Fixed-capacity ring buffer: at capacity, the oldest entry is evicted to
/// admit the new one.
struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> BoundedLog<T> {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(item);
    }

    fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

/// Bounded, observable audit log of hits, misses, and messages.
///
/// Shared as `Arc<Recorder>` across the pipeline; all operations take
/// `&self`. The three logs are owned exclusively by the recorder and mutate
/// only through the three record operations.
pub struct Recorder {
    enabled: AtomicBool,
    hits: Mutex<BoundedLog<RecordedHit>>,
    misses: Mutex<BoundedLog<RecordedMiss>>,
    messages: Mutex<BoundedLog<RecordedMessage>>,
    hit_listeners: Mutex<Vec<Listener<RecordedHit>>>,
    miss_listeners: Mutex<Vec<Listener<RecordedMiss>>>,
    message_listeners: Mutex<Vec<Listener<RecordedMessage>>>,
}

impl Recorder {
    /// Create a recorder whose three logs share one capacity.
    pub fn new(maximum: usize) -> Self {
        Self::with_capacities(maximum, maximum, maximum)
    }

    /// Create a recorder with an independent capacity per log.
    pub fn with_capacities(hits: usize, misses: usize, messages: usize) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            hits: Mutex::new(BoundedLog::new(hits)),
            misses: Mutex::new(BoundedLog::new(misses)),
            messages: Mutex::new(BoundedLog::new(messages)),
            hit_listeners: Mutex::new(Vec::new()),
            miss_listeners: Mutex::new(Vec::new()),
            message_listeners: Mutex::new(Vec::new()),
        }
    }

    /// Whether the recorder still accepts entries.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Permanently turn recording off: every later record operation becomes
    /// a no-op. Idempotent; there is no re-enable.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Record a successfully answered request.
    pub fn hit(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        request: Request,
        response: Answer,
    ) {
        if !self.is_enabled() {
            return;
        }
        let item = RecordedHit {
            id: Uuid::new_v4(),
            start,
            end,
            request,
            response,
        };
        lock(&self.hits).push(item.clone());
        notify(RecordKind::Hit, &self.hit_listeners, &item);
    }

    /// Record a request no active handler answered.
    pub fn miss(&self, start: DateTime<Utc>, end: DateTime<Utc>, request: Request) {
        if !self.is_enabled() {
            return;
        }
        let item = RecordedMiss {
            id: Uuid::new_v4(),
            start,
            end,
            request,
        };
        lock(&self.misses).push(item.clone());
        notify(RecordKind::Miss, &self.miss_listeners, &item);
    }

    /// Record an inter-party informational message.
    pub fn message(&self, time: DateTime<Utc>, data: MessageData) {
        if !self.is_enabled() {
            return;
        }
        let item = RecordedMessage {
            id: Uuid::new_v4(),
            time,
            content: data.content,
            from: data.from,
            to: data.to,
        };
        lock(&self.messages).push(item.clone());
        notify(RecordKind::Message, &self.message_listeners, &item);
    }

    /// Subscribe to hit notifications.
    pub fn on_hit<F>(&self, listener: F)
    where
        F: Fn(&RecordedHit) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        lock(&self.hit_listeners).push(Arc::new(listener));
    }

    /// Subscribe to miss notifications.
    pub fn on_miss<F>(&self, listener: F)
    where
        F: Fn(&RecordedMiss) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        lock(&self.miss_listeners).push(Arc::new(listener));
    }

    /// Subscribe to message notifications.
    pub fn on_message<F>(&self, listener: F)
    where
        F: Fn(&RecordedMessage) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        lock(&self.message_listeners).push(Arc::new(listener));
    }

    /// Snapshot of the current hits log, oldest first.
    pub fn hits(&self) -> Vec<RecordedHit> {
        lock(&self.hits).snapshot()
    }

    /// Snapshot of the current misses log, oldest first.
    pub fn misses(&self) -> Vec<RecordedMiss> {
        lock(&self.misses).snapshot()
    }

    /// Snapshot of the current messages log, oldest first.
    pub fn messages(&self) -> Vec<RecordedMessage> {
        lock(&self.messages).snapshot()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock only ever guards a structurally complete log; recover
    // the guard instead of propagating the panic.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify<T>(kind: RecordKind, listeners: &Mutex<Vec<Listener<T>>>, item: &T) {
    // Snapshot the listener list so a listener that records or subscribes
    // in turn does not re-enter a held lock.
    let current: Vec<Listener<T>> = lock(listeners).clone();
    for listener in &current {
        if let Err(source) = listener(item) {
            let failure = RecorderError::Listener { kind, source };
            tracing::warn!(error = %failure, "recorder listener failed");
        }
    }
}
