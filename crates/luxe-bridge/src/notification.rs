use std::{fmt, str::FromStr, sync::Arc, time::Instant};

use serde::{Deserialize, Serialize};

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// and decides how long they stay on screen by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates an error or failure that may affect functionality.
    Error,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// An operation is still in flight. Never dismissed by a timer.
    Loading,
}

impl NotificationKind {
    /// Auto-dismiss delay used when the caller does not pick one.
    pub fn default_duration_ms(&self) -> u64 {
        match self {
            Self::Success | Self::Info => 5000,
            Self::Warning => 6000,
            Self::Error => 7000,
            Self::Loading => 0,
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Error => "Error!",
            Self::Warning => "Warning!",
            Self::Info => "Info",
            Self::Loading => "Loading...",
        }
    }
}

/// Identifier of a notification, unique for the lifetime of the store that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Screen corner the notification stack is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl NotificationPosition {
    pub fn is_bottom(&self) -> bool {
        matches!(
            self,
            Self::BottomRight | Self::BottomLeft | Self::BottomCenter
        )
    }
}

/// A secondary, user-triggered action shown on a notification.
#[derive(Clone)]
pub struct NotificationAction {
    pub label: String,
    on_invoke: Arc<dyn Fn() + Send + Sync>,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, on_invoke: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_invoke: Arc::new(on_invoke),
        }
    }

    pub fn invoke(&self) {
        (self.on_invoke)();
    }
}

impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied fields for a new notification. Unset fields fall back to
/// per-kind defaults when the notification is created.
#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: Option<String>,
    /// `Some(0)` keeps the notification until it is removed. Ignored for
    /// [`NotificationKind::Loading`].
    pub duration_ms: Option<u64>,
    pub show_progress: Option<bool>,
    pub action: Option<NotificationAction>,
}

impl NotificationInput {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            title: None,
            message: None,
            duration_ms: None,
            show_progress: None,
            action: None,
        }
    }

    /// A notification of `kind` showing `message` under the kind's default
    /// title.
    pub fn titled(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self::new(kind)
            .title(kind.default_title())
            .message(message)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = Some(show_progress);
        self
    }

    #[must_use]
    pub fn action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// A notification currently held by the notification store.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: Option<String>,
    /// Auto-dismiss delay; `0` means the notification stays until removed.
    pub duration_ms: u64,
    /// Whether the renderer should draw the countdown bar.
    pub show_progress: bool,
    pub created_at: Instant,
    pub action: Option<NotificationAction>,
}

/// Effective duration for `kind`, forcing loading notifications to stay.
fn effective_duration(kind: NotificationKind, requested: Option<u64>) -> u64 {
    match kind {
        NotificationKind::Loading => 0,
        _ => requested.unwrap_or_else(|| kind.default_duration_ms()),
    }
}

impl Notification {
    /// Resolves `input` into a notification created at `now`.
    pub fn from_input(id: NotificationId, input: NotificationInput, now: Instant) -> Self {
        let kind = input.kind;
        Self {
            id,
            kind,
            title: input.title,
            message: input.message,
            duration_ms: effective_duration(kind, input.duration_ms),
            show_progress: input
                .show_progress
                .unwrap_or(kind != NotificationKind::Loading),
            created_at: now,
            action: input.action,
        }
    }

    pub fn auto_dismisses(&self) -> bool {
        self.duration_ms > 0
    }

    /// Merges `patch` into this notification, keeping its id and creation
    /// time. Returns whether the dismissal timing changed.
    pub fn apply(&mut self, patch: NotificationPatch) -> bool {
        let before = (self.kind, self.duration_ms);

        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(message) = patch.message {
            self.message = Some(message);
        }
        if let Some(show_progress) = patch.show_progress {
            self.show_progress = show_progress;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }

        let requested = patch.duration_ms.or(match patch.kind {
            // a kind change without an explicit duration takes the new
            // kind's default
            Some(kind) if kind != before.0 => None,
            _ => Some(self.duration_ms),
        });
        self.duration_ms = effective_duration(self.kind, requested);
        if self.kind == NotificationKind::Loading {
            self.show_progress = false;
        }

        before != (self.kind, self.duration_ms)
    }
}

/// Fields to merge into an existing notification; `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub kind: Option<NotificationKind>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub duration_ms: Option<u64>,
    pub show_progress: Option<bool>,
    pub action: Option<NotificationAction>,
}
