//! Widget protocol message types
//!
//! Messages cross the iframe boundary as JSON with a `type` discriminator
//! and camelCase fields, e.g.
//! `{ "type": "widget_resize", "widgetId": "w-1", "height": 640 }`.

use serde::{Deserialize, Serialize};

/// Message exchanged between the widget and its host page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetMessage {
    /// Host -> widget: the host is ready and assigns the widget its id
    #[serde(rename_all = "camelCase")]
    ParentReady {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },

    /// Widget -> host (and self): the widget finished booting
    #[serde(rename_all = "camelCase")]
    WidgetLoaded {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },

    /// Widget -> host: content height changed
    #[serde(rename_all = "camelCase")]
    WidgetResize {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        widget_id: Option<String>,
        height: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },
}
