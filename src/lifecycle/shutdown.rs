//! Stop-request fan-out.
//!
//! One [`Shutdown`] handle is shared by the signal listener and the tests;
//! the HTTP server holds a receiver and drains once it fires.

use tokio::sync::broadcast;

/// Cloneable handle that asks every subscribed task to stop.
#[derive(Debug, Clone)]
pub struct Shutdown {
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self { notify }
    }

    /// A receiver to pass to [`wait_for_shutdown`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Ask every subscriber to stop. Safe to call more than once.
    pub fn trigger(&self) {
        match self.notify.send(()) {
            Ok(listeners) => tracing::debug!(listeners, "Shutdown requested"),
            Err(_) => tracing::debug!("Shutdown requested with nothing running"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once a stop is requested, or once every [`Shutdown`] handle is
/// gone.
pub async fn wait_for_shutdown(mut stop: broadcast::Receiver<()>) {
    // Lagged cannot happen with a single message; Closed means no handle is left.
    let _ = stop.recv().await;
}
