// ── Transient notifications ──
//
// Single-slot notifier: showing a message replaces whatever is visible and
// restarts the auto-dismiss timer. Each timer is a spawned task raced
// against a `CancellationToken`; replacing or hiding cancels it, so
// at most one timer is ever live.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Auto-dismiss delay when the caller doesn't pick one.
pub const DEFAULT_DISMISS: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

struct Inner {
    current: watch::Sender<Option<Notification>>,
    /// Bumped on every show/hide; a timer only clears its own generation.
    generation: AtomicU64,
    timer: Mutex<Option<CancellationToken>>,
    live_timers: AtomicUsize,
}

/// Cloneable handle to the notification slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                current,
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
                live_timers: AtomicUsize::new(0),
            }),
        }
    }

    /// Replace the visible notification and (re)start its dismiss timer.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let notification = Notification {
            message: message.into(),
            severity,
            duration,
        };
        trace!(%severity, message = %notification.message, "notification");

        let token = CancellationToken::new();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.lock_timer().replace(token.clone()) {
            previous.cancel();
        }
        self.inner.current.send_replace(Some(notification));

        let inner = Arc::clone(&self.inner);
        inner.live_timers.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(duration) => {
                    if inner.generation.load(Ordering::SeqCst) == generation {
                        inner.current.send_replace(None);
                        inner.timer.lock().unwrap_or_else(PoisonError::into_inner).take();
                    }
                }
            }
            inner.live_timers.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Hide immediately and cancel the pending timer.
    pub fn hide(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.lock_timer().take() {
            timer.cancel();
        }
        self.inner.current.send_replace(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.inner.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }

    /// Dismiss timers that have not yet fired or observed cancellation.
    pub fn live_timers(&self) -> usize {
        self.inner.live_timers.load(Ordering::SeqCst)
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.inner.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
