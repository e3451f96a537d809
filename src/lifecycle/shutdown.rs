//! Shutdown coordination for the local server.
//!
//! Every stop request, whether it comes from the terminal or from code
//! holding a [`Shutdown`], travels over one broadcast channel and carries a
//! [`ShutdownReason`] so the listener can log what stopped it.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals;

/// Why the server is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl+C in the terminal.
    Interrupt,
    /// [`Shutdown::trigger`] was called.
    Requested,
}

/// Owns the sending side of the stop channel.
///
/// Dropping the last handle also stops subscribers, since their `recv`
/// then reports the channel closed.
pub struct Shutdown {
    tx: broadcast::Sender<ShutdownReason>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownReason> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop.
    pub fn trigger(&self) {
        notify(&self.tx, ShutdownReason::Requested);
    }

    /// Forward the first Ctrl+C to subscribers as [`ShutdownReason::Interrupt`].
    ///
    /// The returned task keeps its own sender, so aborting it is the only way
    /// to stop listening for the signal.
    pub fn trigger_on_ctrl_c(&self) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            signals::ctrl_c().await;
            notify(&tx, ShutdownReason::Interrupt);
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

fn notify(tx: &broadcast::Sender<ShutdownReason>, reason: ShutdownReason) {
    match tx.send(reason) {
        Ok(receivers) => tracing::debug!(?reason, receivers, "Shutdown broadcast"),
        Err(_) => tracing::debug!(?reason, "Shutdown broadcast with no subscribers"),
    }
}
