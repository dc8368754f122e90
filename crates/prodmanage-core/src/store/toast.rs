//! Auto-dismiss timer for toasts.
//!
//! One pending timer at a time: arming again cancels the previous one, so a
//! toast that replaces another gets its full delay.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::actions::{self, ProductAction};

#[derive(Debug)]
pub struct ToastTimer {
    delay: Duration,
    tx: mpsc::UnboundedSender<ProductAction>,
    pending: Option<CancellationToken>,
}

impl ToastTimer {
    /// Creates a timer and the receiver its `ClearToast` actions arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ProductAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Starts the countdown, replacing any pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm(&mut self) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    trace!("toast expired");
                    // Receiver gone means nobody is showing the toast anymore
                    let _ = tx.send(actions::clear_toast());
                }
            }
        });
        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for ToastTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
