//! Transient operator notifications.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::cache::Mutated;
use crate::infra::rest::ApiError;

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Toast {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text: text.into(),
            created_at: Instant::now(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, text)
    }

    /// Success toast preferring the server's message over `default`.
    pub fn for_mutation<T>(outcome: &Mutated<T>, default: &str) -> Self {
        let text = outcome
            .message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(default);
        Self::success(text)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

impl From<&ApiError> for Toast {
    fn from(error: &ApiError) -> Self {
        Toast::error(error.user_message())
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.text)
    }
}

/// Toasts in arrival order; expired ones are dropped on access.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) -> Uuid {
        let id = toast.id;
        self.toasts.push_back(toast);
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn active(&mut self) -> impl Iterator<Item = &Toast> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&mut self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.retain(|toast| !toast.is_expired_at(now));
        self.toasts.iter()
    }

    /// Remove and return every toast, expired or not.
    pub fn drain(&mut self) -> impl Iterator<Item = Toast> + '_ {
        self.toasts.drain(..)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_default() {
        let outcome = Mutated {
            data: (),
            message: Some("Meal plan created".into()),
        };
        assert_eq!(Toast::for_mutation(&outcome, "Saved").text, "Meal plan created");

        let silent = Mutated {
            data: (),
            message: Some("  ".into()),
        };
        assert_eq!(Toast::for_mutation(&silent, "Saved").text, "Saved");
    }

    #[test]
    fn error_toasts_prefer_structured_messages() {
        let structured = ApiError::Server {
            status: 422,
            message: "Title is required".into(),
            code: None,
        };
        let toast = Toast::from(&structured);
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, "Title is required");

        let bare = ApiError::Status {
            status: 502,
            body: String::new(),
            code: None,
        };
        assert_eq!(Toast::from(&bare).text, "Request failed with status 502");
    }

    #[test]
    fn queue_drops_expired_toasts() {
        let mut queue = ToastQueue::new();
        let short = queue.push(Toast::success("short").with_ttl(Duration::from_millis(10)));
        queue.push(Toast::error("long"));

        let later = Instant::now() + Duration::from_millis(50);
        let texts: Vec<_> = queue.active_at(later).map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["long"]);
        assert!(!queue.dismiss(short));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn display_prefixes_the_kind() {
        assert_eq!(Toast::error("boom").to_string(), "[error] boom");
    }
}
