//! Handshake state machine
//!
//! Pure protocol core: consumes incoming messages with their sender origin,
//! produces outgoing messages with their delivery target. The session
//! runtime does the actual posting.

use crate::message::WidgetMessage;

/// Where an outgoing message is posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// The host page (parent frame)
    Parent,
    /// The widget's own window (covers the directly-opened test case)
    SelfWindow,
}

/// An outgoing protocol message
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub target: DeliveryTarget,
    /// Origin restriction for the post; `None` means `*` (only used when
    /// no parent origin could be resolved)
    pub target_origin: Option<String>,
    pub message: WidgetMessage,
}

/// Handshake progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// Listening for `parent_ready`
    AwaitingHandshake,
    /// Handshake completed, widget id captured
    Ready,
}

/// The widget side of the embedding handshake
#[derive(Debug, Clone)]
pub struct HandshakeProtocol {
    parent_origin: Option<String>,
    own_origin: Option<String>,
    correlation_id: Option<String>,
    widget_id: Option<String>,
    state: HandshakeState,
}

impl HandshakeProtocol {
    pub fn new(
        parent_origin: Option<String>,
        own_origin: Option<String>,
        correlation_id: Option<String>,
    ) -> Self {
        Self {
            parent_origin,
            own_origin,
            correlation_id,
            widget_id: None,
            state: HandshakeState::AwaitingHandshake,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn widget_id(&self) -> Option<&str> {
        self.widget_id.as_deref()
    }

    /// Origin restriction for outgoing posts (`None` means `*`)
    pub fn target_origin(&self) -> Option<String> {
        self.parent_origin.clone()
    }

    /// A message is accepted when it comes from the resolved parent origin,
    /// the widget's own origin, the literal `null` origin, or the same
    /// window. Anything else is discarded.
    fn origin_allowed(&self, origin: &str, same_window: bool) -> bool {
        if same_window || origin == "null" {
            return true;
        }
        self.parent_origin.as_deref() == Some(origin)
            || self.own_origin.as_deref() == Some(origin)
    }

    /// Feed one incoming message; returns the messages to post in response
    pub fn on_message(
        &mut self,
        origin: &str,
        same_window: bool,
        message: &WidgetMessage,
    ) -> Vec<Outbound> {
        if !self.origin_allowed(origin, same_window) {
            tracing::debug!(%origin, "Discarding message from unexpected origin");
            return Vec::new();
        }

        match message {
            WidgetMessage::ParentReady {
                widget_id,
                correlation_id,
            } => {
                if let Some(id) = widget_id {
                    self.widget_id = Some(id.clone());
                }
                if self.correlation_id.is_none() {
                    self.correlation_id = correlation_id.clone();
                }
                self.state = HandshakeState::Ready;
                self.loaded_broadcast()
            }
            // The widget only ever receives parent_ready; its own loopback
            // messages and anything else are ignored
            _ => Vec::new(),
        }
    }

    /// Liveness guarantee: emitted after a fixed post-mount delay so hosts
    /// or tests that missed the handshake race still observe readiness
    pub fn proactive_loaded(&self) -> Vec<Outbound> {
        self.loaded_broadcast()
    }

    /// `widget_loaded` to both the parent frame and the window itself
    fn loaded_broadcast(&self) -> Vec<Outbound> {
        let message = WidgetMessage::WidgetLoaded {
            widget_id: self.widget_id.clone(),
            correlation_id: self.correlation_id.clone(),
        };
        vec![
            Outbound {
                target: DeliveryTarget::Parent,
                target_origin: self.target_origin(),
                message: message.clone(),
            },
            Outbound {
                target: DeliveryTarget::SelfWindow,
                target_origin: None,
                message,
            },
        ]
    }

    /// Build a resize notification for the host
    pub fn resize_outbound(&self, height: u32) -> Outbound {
        Outbound {
            target: DeliveryTarget::Parent,
            target_origin: self.target_origin(),
            message: WidgetMessage::WidgetResize {
                widget_id: self.widget_id.clone(),
                height,
                correlation_id: self.correlation_id.clone(),
            },
        }
    }
}
