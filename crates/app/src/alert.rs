//! Blocking modal alerts.
//!
//! Detail and form screens report outcomes through an [`AlertSink`]; list
//! screens never do (their failures are only logged).

use std::sync::Mutex;

pub const TITLE_SUCCESS: &str = "Succès";
pub const TITLE_ERROR: &str = "Erreur";
pub const TITLE_CONFIRMATION: &str = "Confirmation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: TITLE_SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: TITLE_ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == TITLE_ERROR
    }
}

/// A destructive action waiting for the user's go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: String,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl Confirmation {
    pub fn destructive(message: impl Into<String>) -> Self {
        Self {
            title: TITLE_CONFIRMATION,
            message: message.into(),
            confirm_label: "Supprimer",
            cancel_label: "Annuler",
        }
    }
}

/// Where screens send their alerts.
pub trait AlertSink: Send + Sync {
    fn show(&self, alert: Alert);
}

/// Writes alerts to the log; used by the terminal front end.
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn show(&self, alert: Alert) {
        if alert.is_error() {
            tracing::warn!(title = %alert.title, message = %alert.message, "Alert");
        } else {
            tracing::info!(title = %alert.title, message = %alert.message, "Alert");
        }
    }
}

/// Keeps every alert shown, in order.
#[derive(Default)]
pub struct RecordingAlerts {
    shown: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Alert> {
        self.shown
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Alert> {
        self.shown().pop()
    }
}

impl AlertSink for RecordingAlerts {
    fn show(&self, alert: Alert) {
        self.shown
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(alert);
    }
}
