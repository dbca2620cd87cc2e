//! Search input debouncing.
//!
//! [`SearchDebouncer`] coalesces rapid changes of the search box into one
//! settled term. Every change re-arms a single timer; when the input has been
//! quiet for the whole period the trimmed value is emitted on the output
//! channel, where the listing turns it into a navigation. At most one timer is
//! pending at any time, and shutting the debouncer down drops it unfired.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Quiet period before a search term is applied.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Handle to a running debounce task.
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawn a debouncer on the current Tokio runtime.
    ///
    /// Returns the handle and the receiver of settled (trimmed) terms.
    pub fn spawn(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(quiet_period, input_rx, settled_tx, cancel.clone()));

        (
            Self {
                input,
                cancel,
                handle,
            },
            settled_rx,
        )
    }

    /// Report a new raw value of the search box.
    pub fn input(&self, value: impl Into<String>) {
        if self.input.send(value.into()).is_err() {
            tracing::debug!("Search debouncer already stopped, input ignored");
        }
    }

    /// Stop the task, dropping any pending timer without emitting.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!(error = %e, "Search debouncer task failed");
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    quiet_period: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    settled: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
) {
    let mut pending: Option<String> = None;
    let timer = tokio::time::sleep(quiet_period);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                if pending.is_some() {
                    tracing::debug!("Search debouncer stopped with a pending term");
                }
                break;
            }
            received = input.recv() => match received {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet_period);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    let term = value.trim().to_string();
                    tracing::debug!(term = %term, "Search input settled");
                    if settled.send(term).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
