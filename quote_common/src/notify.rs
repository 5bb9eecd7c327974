//! Transient user notifications emitted by sync merges.
//!
//! Notifications are fire-and-forget: emitters never learn whether anyone saw them.
//! `ChannelNotifier` forwards them from sync workers to a display thread, which
//! posts them on a `NotificationBoard` that keeps them visible for
//! [`DISMISS_AFTER_MS`] and drops them afterwards.
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use crossbeam_channel::Sender;
use log::{info, warn};

/// How long a notification stays visible, in milliseconds.
pub const DISMISS_AFTER_MS: i64 = 3000;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A remote quote was appended.
    Added,
    /// A remote quote overwrote a local one with the same text.
    Conflict,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Trigger of the message.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// When the notification was raised.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification stamped with the current time.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Notification {
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Notification for an appended remote quote.
    pub fn added(text: &str) -> Self {
        Self::new(NotificationKind::Added, format!("Added new quote: {}", text))
    }

    /// Notification for a local quote overwritten by a remote one.
    pub fn conflict(text: &str) -> Self {
        Self::new(
            NotificationKind::Conflict,
            format!("Conflict detected for quote: {}", text),
        )
    }

    /// Returns `true` once the dismissal delay has elapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= TimeDelta::milliseconds(DISMISS_AFTER_MS)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for notifications. Implementations must not block the caller for long.
pub trait Notifier: Send + Sync {
    /// Surfaces `notification`; never fails.
    fn notify(&self, notification: Notification);
}

/// Keeps recent notifications visible until they auto-dismiss.
#[derive(Default)]
pub struct NotificationBoard {
    visible: Mutex<Vec<Notification>>,
}

impl NotificationBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops expired notifications and returns the ones still visible at `now`.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        match self.visible.lock() {
            Ok(mut visible) => {
                visible.retain(|n| !n.is_expired_at(now));
                visible.clone()
            }
            Err(e) => {
                warn!("Notification board lock poisoned: {}", e);
                Vec::new()
            }
        }
    }

    /// Notifications still visible right now.
    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Utc::now())
    }
}

impl Notifier for NotificationBoard {
    fn notify(&self, notification: Notification) {
        info!("{}", notification);
        match self.visible.lock() {
            Ok(mut visible) => {
                let now = Utc::now();
                visible.retain(|n| !n.is_expired_at(now));
                visible.push(notification);
            }
            Err(e) => warn!("Notification board lock poisoned: {}", e),
        }
    }
}

/// Forwards notifications into a crossbeam channel.
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    /// Wraps the sending half of a notification channel.
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!("Notification dropped, receiver closed: {}", e.into_inner());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_dismisses_after_delay() {
        let board = NotificationBoard::new();
        let note = Notification::added("Hello");
        let created = note.created_at;
        board.notify(note);

        assert_eq!(board.visible_at(created + TimeDelta::milliseconds(2999)).len(), 1);
        assert!(board.visible_at(created + TimeDelta::milliseconds(3000)).is_empty());
        // Dismissed entries are gone for good.
        assert!(board.visible_at(created).is_empty());
    }

    #[test]
    fn messages_name_the_quote() {
        assert_eq!(Notification::added("A").message, "Added new quote: A");
        assert_eq!(
            Notification::conflict("B").message,
            "Conflict detected for quote: B"
        );
    }

    #[test]
    fn channel_notifier_survives_closed_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let notifier = ChannelNotifier::new(tx);
        notifier.notify(Notification::added("first"));
        assert_eq!(rx.recv().unwrap().kind, NotificationKind::Added);
        drop(rx);
        notifier.notify(Notification::conflict("lost"));
    }
}
