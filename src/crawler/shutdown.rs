//! Cooperative cancellation shared by every fetch worker
//!
//! A single [`ShutdownTrigger`] flips the flag; any number of [`Shutdown`]
//! handles observe it, either by polling between units of work or by racing
//! [`Shutdown::wait`] against in-flight I/O.

use tokio::sync::watch;

/// Sending half, held by whoever reacts to the interrupt signal
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receiving half, cloned into every worker
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

/// Creates a connected trigger/listener pair
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    /// Signals shutdown to every listener. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    /// Returns true once shutdown has been signalled
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes when shutdown is signalled
    ///
    /// If the trigger is dropped without firing, this never completes.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        let observed = rx.wait_for(|triggered| *triggered).await.map(|_| ());
        if observed.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
