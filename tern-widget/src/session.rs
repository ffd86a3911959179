//! Widget session runtime
//!
//! Drives the pure protocol core on tokio: message intake, observer-pushed
//! height samples plus a fixed-interval poll fallback (for environments
//! without a content-size observer), and the delayed proactive
//! `widget_loaded`. Teardown cancels every task; no dangling timers or
//! listeners survive the session.

use crate::handshake::{HandshakeProtocol, Outbound};
use crate::message::WidgetMessage;
use crate::resize::HeightReporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Timing configuration for the session loop
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fallback poll interval for height sampling
    pub poll_interval: Duration,
    /// Delay before the proactive `widget_loaded` emission
    pub loaded_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            loaded_delay: Duration::from_millis(500),
        }
    }
}

/// Source of the widget's content height (the poll fallback probes this)
pub trait HeightProbe: Send + Sync {
    fn content_height(&self) -> u32;
}

enum SessionInput {
    Message {
        origin: String,
        same_window: bool,
        message: WidgetMessage,
    },
    Height(u32),
}

/// A running widget session
///
/// Owns the protocol state machine and the resize reporter on a single
/// task; intake and emission happen over channels.
pub struct WidgetSession {
    input_tx: mpsc::UnboundedSender<SessionInput>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl WidgetSession {
    /// Spawn the session loop; returns the session handle and the stream
    /// of outgoing messages to post
    pub fn spawn(
        config: SessionConfig,
        protocol: HandshakeProtocol,
        probe: Arc<dyn HeightProbe>,
    ) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run_session(
            config,
            protocol,
            probe,
            input_rx,
            outbound_tx,
            cancel.clone(),
        ));

        (
            Self {
                input_tx,
                cancel,
                handle: Some(handle),
            },
            outbound_rx,
        )
    }

    /// Deliver an incoming message (the host-side message listener calls this)
    pub fn deliver(&self, origin: impl Into<String>, same_window: bool, message: WidgetMessage) {
        let _ = self.input_tx.send(SessionInput::Message {
            origin: origin.into(),
            same_window,
            message,
        });
    }

    /// Push an observer-reported height sample
    pub fn notify_height(&self, height: u32) {
        let _ = self.input_tx.send(SessionInput::Height(height));
    }

    /// Tear the session down: cancels the loop and waits for it to finish
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for WidgetSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_session(
    config: SessionConfig,
    mut protocol: HandshakeProtocol,
    probe: Arc<dyn HeightProbe>,
    mut input_rx: mpsc::UnboundedReceiver<SessionInput>,
    outbound_tx: mpsc::UnboundedSender<Outbound>,
    cancel: CancellationToken,
) {
    let mut reporter = HeightReporter::new();
    let mut poll = tokio::time::interval(config.poll_interval);
    let loaded_timer = tokio::time::sleep(config.loaded_delay);
    tokio::pin!(loaded_timer);
    let mut loaded_fired = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            _ = &mut loaded_timer, if !loaded_fired => {
                loaded_fired = true;
                for outbound in protocol.proactive_loaded() {
                    let _ = outbound_tx.send(outbound);
                }
            }

            _ = poll.tick() => {
                if let Some(height) = reporter.observe(probe.content_height()) {
                    let _ = outbound_tx.send(protocol.resize_outbound(height));
                }
            }

            input = input_rx.recv() => match input {
                Some(SessionInput::Message { origin, same_window, message }) => {
                    for outbound in protocol.on_message(&origin, same_window, &message) {
                        let _ = outbound_tx.send(outbound);
                    }
                }
                Some(SessionInput::Height(height)) => {
                    if let Some(height) = reporter.observe(height) {
                        let _ = outbound_tx.send(protocol.resize_outbound(height));
                    }
                }
                None => break,
            }
        }
    }

    tracing::debug!("Widget session loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handshake::DeliveryTarget;

    struct FixedHeight(u32);

    impl HeightProbe for FixedHeight {
        fn content_height(&self) -> u32 {
            self.0
        }
    }

    fn protocol() -> HandshakeProtocol {
        HandshakeProtocol::new(
            Some("https://host.example".to_string()),
            None,
            Some("c-1".to_string()),
        )
    }

    fn quick_config() -> SessionConfig {
        SessionConfig {
            poll_interval: Duration::from_millis(10),
            loaded_delay: Duration::from_millis(30),
        }
    }

    async fn drain_for(
        rx: &mut mpsc::UnboundedReceiver<Outbound>,
        duration: Duration,
    ) -> Vec<Outbound> {
        let mut collected = Vec::new();
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(outbound)) => collected.push(outbound),
                _ => break,
            }
        }
        collected
    }

    #[tokio::test]
    async fn test_poll_reports_height_once_while_unchanged() {
        let (session, mut rx) =
            WidgetSession::spawn(quick_config(), protocol(), Arc::new(FixedHeight(640)));

        let out = drain_for(&mut rx, Duration::from_millis(120)).await;
        session.shutdown().await;

        let resizes: Vec<_> = out
            .iter()
            .filter(|o| matches!(o.message, WidgetMessage::WidgetResize { .. }))
            .collect();
        // Many poll ticks elapsed, but the unchanged height is sent once
        assert_eq!(resizes.len(), 1);
        assert_eq!(
            resizes[0].message,
            WidgetMessage::WidgetResize {
                widget_id: None,
                height: 640,
                correlation_id: Some("c-1".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_observer_sample_deduplicated_against_poll() {
        let (session, mut rx) =
            WidgetSession::spawn(quick_config(), protocol(), Arc::new(FixedHeight(640)));

        // Observer repeats the height the poll already reported
        tokio::time::sleep(Duration::from_millis(40)).await;
        session.notify_height(640);
        session.notify_height(720);

        let out = drain_for(&mut rx, Duration::from_millis(60)).await;
        session.shutdown().await;

        let heights: Vec<u32> = out
            .iter()
            .filter_map(|o| match o.message {
                WidgetMessage::WidgetResize { height, .. } => Some(height),
                _ => None,
            })
            .collect();
        // 640 once (poll), then 720 (observer), then 640 again (poll sees
        // the probe height differing from the last report)
        assert_eq!(heights[0], 640);
        assert!(heights.contains(&720));
        assert!(!heights.windows(2).any(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_proactive_loaded_fires_without_handshake() {
        let (session, mut rx) =
            WidgetSession::spawn(quick_config(), protocol(), Arc::new(FixedHeight(0)));

        let out = drain_for(&mut rx, Duration::from_millis(80)).await;
        session.shutdown().await;

        let loaded: Vec<_> = out
            .iter()
            .filter(|o| matches!(o.message, WidgetMessage::WidgetLoaded { .. }))
            .collect();
        // Exactly one broadcast: parent + self window
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().any(|o| o.target == DeliveryTarget::Parent));
        assert!(loaded.iter().any(|o| o.target == DeliveryTarget::SelfWindow));
    }

    #[tokio::test]
    async fn test_handshake_reply_and_origin_rejection() {
        // Long loaded delay keeps the proactive broadcast out of this test
        let config = SessionConfig {
            poll_interval: Duration::from_millis(10),
            loaded_delay: Duration::from_secs(60),
        };
        let (session, mut rx) = WidgetSession::spawn(config, protocol(), Arc::new(FixedHeight(0)));

        session.deliver(
            "https://evil.example",
            false,
            WidgetMessage::ParentReady {
                widget_id: Some("w-evil".to_string()),
                correlation_id: None,
            },
        );
        session.deliver(
            "https://host.example",
            false,
            WidgetMessage::ParentReady {
                widget_id: Some("w-1".to_string()),
                correlation_id: None,
            },
        );

        let out = drain_for(&mut rx, Duration::from_millis(20)).await;
        session.shutdown().await;

        let loaded: Vec<_> = out
            .iter()
            .filter_map(|o| match &o.message {
                WidgetMessage::WidgetLoaded { widget_id, .. } => Some(widget_id.clone()),
                _ => None,
            })
            .collect();
        // Only the trusted handshake produced replies, carrying its widget id
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|id| id.as_deref() == Some("w-1")));
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_loop() {
        let (session, mut rx) =
            WidgetSession::spawn(quick_config(), protocol(), Arc::new(FixedHeight(100)));

        session.shutdown().await;
        // Drain whatever was in flight; the channel must then close
        while rx.recv().await.is_some() {}
    }
}
