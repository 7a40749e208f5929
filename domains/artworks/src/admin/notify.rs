//! Toast notifications for the admin client
//!
//! Controllers push toasts into a channel; whatever renders them owns the
//! receiving end.

use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: "Success".to_string(),
            description: Some(description.into()),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Error".to_string(),
            description: Some(description.into()),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            title: title.into(),
            description: None,
        }
    }
}

/// Sending half of the toast channel
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, toast: Toast) {
        if self.tx.send(toast).is_err() {
            tracing::debug!("Toast dropped, no receiver");
        }
    }
}
