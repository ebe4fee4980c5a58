//! Notification channel for surfacing failures to the user.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub text: String,
    pub error: bool,
}

impl Alert {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: true,
        }
    }
}

/// Fire-and-forget alert dispatch.
pub trait AlertSink: Send + Sync {
    fn set(&self, alert: Alert);
}

/// Writes alerts to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn set(&self, alert: Alert) {
        if alert.error {
            tracing::error!(text = %alert.text, "alert");
        } else {
            tracing::info!(text = %alert.text, "alert");
        }
    }
}

/// Forwards alerts to a receiver, typically drained by a UI loop.
#[derive(Debug, Clone)]
pub struct ChannelAlerts {
    tx: mpsc::UnboundedSender<Alert>,
}

impl ChannelAlerts {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Alert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelAlerts {
    fn set(&self, alert: Alert) {
        if self.tx.send(alert).is_err() {
            tracing::debug!("Alert receiver dropped, discarding alert");
        }
    }
}
