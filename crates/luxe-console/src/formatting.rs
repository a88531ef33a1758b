use std::fmt::Write;

use luxe_bridge::notification::{Notification, NotificationKind};

/// Formats a remaining duration in a human-readable `HH:MM:SS` or `MM:SS`
/// format.
pub fn format_eta(seconds: f64) -> String {
    let total = seconds.max(0.0).ceil() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut out = String::with_capacity(8);
    if hours > 0 {
        write!(&mut out, "{:02}:{:02}:{:02}", hours, minutes, secs).unwrap();
    } else {
        write!(&mut out, "{:02}:{:02}", minutes, secs).unwrap();
    }

    out
}

/// Describes how long a notification stays on screen.
pub fn format_lifetime(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Loading => "working".to_string(),
        _ if !notification.auto_dismisses() => "until dismissed".to_string(),
        _ => format_eta(notification.duration_ms as f64 / 1000.0),
    }
}

/// Glyph shown in front of a notification of the given kind.
pub fn kind_marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Warning => "!",
        NotificationKind::Info => "i",
        NotificationKind::Loading => "…",
    }
}
