//! Transient feedback banner.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    /// How long a toast stays up before `tick` hides it.
    pub ttl: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(3),
        }
    }
}

/// One toast slot. Showing a new message replaces the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toast {
    message: String,
    kind: ToastKind,
    visible: bool,
    shown_at: Option<DateTime<Utc>>,
}

impl Toast {
    pub fn success(&mut self, message: impl Into<String>) {
        self.show_at(ToastKind::Success, message, Utc::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show_at(ToastKind::Error, message, Utc::now());
    }

    pub fn show_at(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
        self.shown_at = Some(now);
    }

    /// Hide the toast; the last message stays readable.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Hide the toast once it has been up for `config.ttl`. Returns whether it expired.
    pub fn tick(&mut self, now: DateTime<Utc>, config: &ToastConfig) -> bool {
        match self.shown_at {
            Some(shown_at) if self.visible && now - shown_at >= config.ttl => {
                self.visible = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message and kind, only while visible.
    pub fn current(&self) -> Option<(ToastKind, &str)> {
        self.visible.then_some((self.kind, self.message.as_str()))
    }
}
