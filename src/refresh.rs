//! Periodic background refresh
//!
//! Ticks on a fixed interval from a background tokio task and signals the
//! main loop through an mpsc channel. The main loop reacts by refetching the
//! forecast and overwriting the current snapshot; a tick that arrives while
//! a fetch is in flight is simply superseded by the newer data.

use std::time::Duration;
use tokio::sync::mpsc;

/// Messages sent from the background refresh task to the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMessage {
    /// The refresh interval elapsed; fetch fresh data
    Tick,
}

/// Configuration for the refresh interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between forecast refreshes
    pub interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300), // 5 minutes
            enabled: true,
        }
    }
}

/// Handle for the background refresh task
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Spawns the background refresh task
    ///
    /// The first tick fires one full interval after spawning; the initial
    /// load is the caller's responsibility.
    pub fn spawn(config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(8);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(config.interval);
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let _ = msg_tx.send(RefreshMessage::Tick).await;
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Checks for a pending refresh message without blocking
    pub fn try_recv(&mut self) -> Option<RefreshMessage> {
        self.receiver.try_recv().ok()
    }

    /// Shuts down the background refresh task
    #[allow(dead_code)]
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval, Duration::from_secs(300));
        assert!(config.enabled);
    }

    #[test]
    fn test_refresh_config_custom() {
        let config = RefreshConfig {
            interval: Duration::from_secs(60),
            enabled: false,
        };
        assert_eq!(config.interval, Duration::from_secs(60));
        assert!(!config.enabled);
    }

    #[tokio::test]
    async fn test_refresh_handle_spawn_disabled() {
        let config = RefreshConfig {
            enabled: false,
            ..Default::default()
        };

        let mut handle = RefreshHandle::spawn(config);

        // With refresh disabled, there should be no messages
        assert!(handle.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_refresh_handle_ticks_after_interval() {
        let config = RefreshConfig {
            interval: Duration::from_millis(10),
            enabled: true,
        };

        let mut handle = RefreshHandle::spawn(config);

        let message = tokio::time::timeout(Duration::from_secs(1), handle.receiver.recv())
            .await
            .expect("tick should arrive within a second");
        assert_eq!(message, Some(RefreshMessage::Tick));
    }
}
