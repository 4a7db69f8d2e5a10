//! Stop handle shared by the signal listener and the HTTP server.

use tokio::sync::broadcast;

/// Tells running [`HttpServer`](crate::HttpServer)s to stop accepting
/// connections and drain in-flight requests.
///
/// Each server gets its own receiver from [`Shutdown::subscribe`] before
/// `run` is called; a receiver whose handle is dropped also stops its server.
pub struct Shutdown {
    stop: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stop, _) = broadcast::channel(1);
        Self { stop }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.stop.subscribe()
    }

    /// Signal every subscribed server. Returns how many were still running.
    pub fn trigger(&self) -> usize {
        let notified = self.stop.send(()).unwrap_or(0);
        tracing::debug!(servers = notified, "Stop requested");
        notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_every_server() {
        let shutdown = Shutdown::new();
        let mut first = shutdown.subscribe();
        let mut second = shutdown.subscribe();

        assert_eq!(shutdown.trigger(), 2);
        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
    }

    #[test]
    fn trigger_with_nothing_running_notifies_nobody() {
        assert_eq!(Shutdown::new().trigger(), 0);
    }
}
