//! Shutdown coordination.
//!
//! A `watch` channel latches the request, so tasks that subscribe after
//! `trigger` still observe it.

use tokio::sync::watch;

/// Handle held by whoever decides when the gateway stops.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Subscriber side; resolves once shutdown has been requested.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Wait for the request. Dropping the `Shutdown` handle also counts.
    pub async fn recv(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
