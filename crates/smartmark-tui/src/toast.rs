// Short-lived notifications stacked in the top-right corner
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

/// Toasts in arrival order, each living for `ttl`
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.push_at(message, kind, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            kind,
            created_at: now,
        });
    }

    /// Drop every toast older than the ttl
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
