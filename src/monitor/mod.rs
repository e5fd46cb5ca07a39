//! Clipboard change monitoring
//!
//! The Win32 clipboard only pushes change notifications to windows, which a
//! console process does not have. The monitor instead polls the clipboard
//! sequence number: when the counter moves, the clipboard text is read and
//! routed to a success or failure callback. Crude, but it is the only option
//! that needs no window, and a counter compare per tick is cheap.

use crate::clipboard::{Clipboard, ClipboardError, ClipboardEvent, ClipboardWatcher};
use crate::config::MonitorConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default delay between clipboard polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Capacity of the async watcher channel
const WATCH_CHANNEL_CAPACITY: usize = 100;

type ChangeCallback = Box<dyn FnMut(&str) + Send>;
type ErrorCallback = Box<dyn FnMut(&ClipboardError) + Send>;

/// Polling clipboard change monitor
///
/// Holds the last observed sequence number, a poll interval, and the two
/// callbacks. [`Monitor::run`] blocks the calling thread; embedders that
/// need cancellation use [`Monitor::run_until`], async consumers use
/// [`watch`].
pub struct Monitor {
    backend: Arc<dyn Clipboard>,
    poll_interval: Duration,
    max_size: usize,
    last_sequence: Option<u32>,
    on_change: ChangeCallback,
    on_error: ErrorCallback,
}

impl Monitor {
    /// Create a monitor with default settings.
    ///
    /// The default callbacks log through `tracing` at debug/warn level.
    pub fn new(backend: Arc<dyn Clipboard>) -> Self {
        Self {
            backend,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_size: crate::clipboard::MAX_CLIPBOARD_SIZE,
            last_sequence: None,
            on_change: Box::new(|text| debug!(len = text.len(), "clipboard changed")),
            on_error: Box::new(|err| warn!("failed to read clipboard: {}", err)),
        }
    }

    /// Create a monitor from a validated configuration.
    pub fn from_config(backend: Arc<dyn Clipboard>, config: &MonitorConfig) -> Self {
        let mut monitor = Self::new(backend);
        monitor.poll_interval = config.poll_interval();
        monitor.max_size = config.max_size;
        monitor
    }

    /// Set the delay between clipboard polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the callback invoked with the clipboard text after a change.
    pub fn on_change(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Box::new(callback);
        self
    }

    /// Set the callback invoked when a change is detected but the clipboard
    /// text cannot be read. The error carries the platform error code where
    /// one exists.
    pub fn on_error(mut self, callback: impl FnMut(&ClipboardError) + Send + 'static) -> Self {
        self.on_error = Box::new(callback);
        self
    }

    /// Perform one polling step. Returns `true` when a change was observed.
    ///
    /// A tick where the sequence number cannot be read is skipped: access
    /// rights rarely vanish mid-run, so the next tick retries. The first
    /// successful read only seeds the counter and fires nothing.
    pub fn poll_once(&mut self) -> bool {
        let Some(current) = self.backend.sequence_number() else {
            return false;
        };

        match self.last_sequence.replace(current) {
            Some(previous) if previous != current => {
                debug!(previous, current, "clipboard sequence number moved");
                match self.backend.get_text() {
                    Ok(text) if text.len() > self.max_size => {
                        let err = ClipboardError::TooLarge {
                            size: text.len(),
                            max: self.max_size,
                        };
                        (self.on_error)(&err);
                    }
                    Ok(text) => (self.on_change)(&text),
                    Err(err) => (self.on_error)(&err),
                }
                true
            }
            _ => false,
        }
    }

    /// Run the polling loop until the stop flag is raised.
    ///
    /// The initial sequence number is read once up front; if it is
    /// unavailable the loop does not start, since that means the process
    /// cannot observe the clipboard at all.
    pub fn run_until(&mut self, stop: &AtomicBool) -> Result<(), ClipboardError> {
        if self.last_sequence.is_none() {
            let sequence = self.backend.sequence_number().ok_or_else(|| {
                ClipboardError::Watch(
                    "clipboard sequence number unavailable; missing WINSTA_ACCESSCLIPBOARD?"
                        .to_string(),
                )
            })?;
            self.last_sequence = Some(sequence);
            debug!(sequence, backend = self.backend.name(), "clipboard monitor started");
        }

        while !stop.load(Ordering::Relaxed) {
            self.poll_once();
            std::thread::sleep(self.poll_interval);
        }

        debug!("clipboard monitor stopped");
        Ok(())
    }

    /// Run the polling loop forever on the calling thread.
    pub fn run(&mut self) -> Result<(), ClipboardError> {
        let never = AtomicBool::new(false);
        self.run_until(&never)
    }
}

/// Watch the clipboard asynchronously.
///
/// Spawns a tokio task that polls the sequence number on an interval and
/// delivers [`ClipboardEvent`]s over a channel. Dropping the watcher (its
/// receiver) ends the task. Reads that fail are logged and skipped; the
/// counter stays seeded so the failed change is not re-reported.
pub fn watch(
    backend: Arc<dyn Clipboard>,
    poll_interval: Duration,
) -> Result<ClipboardWatcher, ClipboardError> {
    let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        let mut last_sequence = backend.sequence_number();

        loop {
            // Wake on the tick, or as soon as the receiver is gone so an
            // idle clipboard cannot keep the task alive.
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tx.closed() => break,
            }

            let Some(current) = backend.sequence_number() else {
                continue;
            };
            if last_sequence == Some(current) {
                continue;
            }
            let seeding = last_sequence.is_none();
            last_sequence = Some(current);
            if seeding {
                continue;
            }

            match backend.get_text() {
                Ok(text) => {
                    let event = ClipboardEvent {
                        text,
                        sequence: current,
                    };
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(err) => warn!("clipboard read failed while watching: {}", err),
            }
        }
    });

    Ok(ClipboardWatcher::new(rx, handle))
}
