//! Tern Widget - embedded-widget handshake protocol
//!
//! Runs inside an iframe with no authentication context: performs an
//! origin-validated handshake with the host page, continuously reports
//! content height for auto-resizing, and exposes a minimal lifecycle
//! (`widget_loaded`, `widget_resize`) over a postMessage-style channel.
//!
//! The protocol core is pure (no I/O); [`session::WidgetSession`] drives it
//! on tokio with a poll fallback and clean teardown.

pub mod handshake;
pub mod message;
pub mod origin;
pub mod params;
pub mod resize;
pub mod session;

pub use handshake::{DeliveryTarget, HandshakeProtocol, HandshakeState, Outbound};
pub use message::WidgetMessage;
pub use params::WidgetParams;
pub use resize::HeightReporter;
pub use session::{HeightProbe, SessionConfig, WidgetSession};
