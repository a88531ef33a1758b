//! Ordered collection of visible notifications.
//!
//! The store is synchronous and owns no timers: it records when each
//! countdown started and answers when it ends. [`crate::Toaster`] schedules
//! the actual dismissals.

use std::time::Instant;

use luxe_bridge::notification::{
    Notification, NotificationAction, NotificationId, NotificationInput, NotificationKind,
    NotificationPatch,
};

use crate::{
    clock::{Clock, TokioClock},
    countdown,
};

#[derive(Debug, Clone)]
struct Entry {
    notification: Notification,
    /// Start of the running countdown: creation, or the last update that
    /// changed the timing.
    countdown_from: Instant,
}

impl Entry {
    fn deadline(&self) -> Option<Instant> {
        countdown::lifetime(self.notification.duration_ms).map(|life| self.countdown_from + life)
    }
}

/// Notifications in insertion order.
#[derive(Debug)]
pub struct NotificationStore<C = TokioClock> {
    clock: C,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Default for NotificationStore<TokioClock> {
    fn default() -> Self {
        Self::new(TokioClock)
    }
}

impl<C: Clock> NotificationStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Appends a notification and returns its id.
    pub fn add(&mut self, input: NotificationInput) -> NotificationId {
        let id = NotificationId::from_raw(self.next_id);
        self.next_id += 1;

        let now = self.clock.now();
        self.entries.push(Entry {
            notification: Notification::from_input(id, input, now),
            countdown_from: now,
        });

        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Success, message))
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Error, message))
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Warning, message))
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Info, message))
    }

    pub fn loading(&mut self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Loading, message))
    }

    /// Removes a notification. Returns `false` if it was not present.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Merges `patch` into a notification in place.
    ///
    /// Returns `None` if the notification is not present, otherwise whether
    /// its countdown was restarted.
    pub fn update(&mut self, id: NotificationId, patch: NotificationPatch) -> Option<bool> {
        let now = self.clock.now();
        let entry = self.entry_mut(id)?;

        let restarted = entry.notification.apply(patch);
        if restarted {
            entry.countdown_from = now;
        }
        Some(restarted)
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries
            .iter()
            .find(|entry| entry.notification.id == id)
            .map(|entry| &entry.notification)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|entry| &entry.notification)
    }

    /// Ordered copy of the current notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn action(&self, id: NotificationId) -> Option<NotificationAction> {
        self.get(id).and_then(|notification| notification.action.clone())
    }

    /// Runs the action of a notification. Returns `false` when there is
    /// nothing to run.
    pub fn invoke_action(&self, id: NotificationId) -> bool {
        match self.action(id) {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Countdown progress of a notification, for the progress bar.
    pub fn remaining_percent(&self, id: NotificationId) -> Option<f64> {
        let now = self.clock.now();
        self.entries
            .iter()
            .find(|entry| entry.notification.id == id)
            .map(|entry| {
                countdown::remaining_percent(
                    entry.notification.duration_ms,
                    now.saturating_duration_since(entry.countdown_from),
                )
            })
    }

    /// Instant a notification will be dismissed at, if it auto-dismisses.
    pub fn deadline(&self, id: NotificationId) -> Option<Instant> {
        self.entries
            .iter()
            .find(|entry| entry.notification.id == id)
            .and_then(Entry::deadline)
    }

    /// Removes every notification whose countdown has run out and returns
    /// their ids.
    pub fn expire(&mut self) -> Vec<NotificationId> {
        let now = self.clock.now();
        let mut expired = Vec::new();

        self.entries.retain(|entry| match entry.deadline() {
            Some(deadline) if deadline <= now => {
                expired.push(entry.notification.id);
                false
            }
            _ => true,
        });

        expired
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.notification.id == id)
    }

    fn entry_mut(&mut self, id: NotificationId) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.notification.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    };

    use super::*;
    use crate::clock::ManualClock;

    fn store() -> (NotificationStore<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (NotificationStore::new(clock.clone()), clock)
    }

    fn ids(store: &NotificationStore<ManualClock>) -> Vec<NotificationId> {
        store.iter().map(|notification| notification.id).collect()
    }

    #[test]
    fn new_store_is_empty() {
        let (store, _) = store();
        assert!(store.is_empty());
    }

    #[test]
    fn notifications_keep_insertion_order() {
        let (mut store, _) = store();
        let first = store.info("one");
        let second = store.warning("two");
        let third = store.error("three");

        assert_eq!(ids(&store), vec![first, second, third]);

        assert!(store.remove(second));
        assert_eq!(ids(&store), vec![first, third]);
    }

    #[test]
    fn ids_are_unique() {
        let (mut store, _) = store();
        let first = store.info("one");
        store.remove(first);
        let second = store.info("two");

        assert_ne!(first, second);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let (mut store, _) = store();
        store.info("one");

        assert!(!store.remove(NotificationId::from_raw(99)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn shortcuts_use_kind_titles() {
        let (mut store, _) = store();
        let id = store.success("Saved");

        let notification = store.get(id).unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.title.as_deref(), Some("Success!"));
        assert_eq!(notification.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn countdown_is_half_way_after_half_the_duration() {
        let (mut store, clock) = store();
        let id = store.success("Saved");

        clock.advance(Duration::from_millis(2500));
        assert_eq!(store.remaining_percent(id), Some(50.0));
        assert!(store.expire().is_empty());

        clock.advance(Duration::from_millis(2499));
        assert!(store.expire().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.expire(), vec![id]);
        assert!(store.is_empty());
    }

    #[test]
    fn loading_survives_any_amount_of_time() {
        let (mut store, clock) = store();
        let id = store.add(NotificationInput::new(NotificationKind::Loading).duration_ms(5000));

        clock.advance(Duration::from_secs(24 * 60 * 60));
        assert!(store.expire().is_empty());
        assert_eq!(store.get(id).map(|n| n.duration_ms), Some(0));
        assert_eq!(store.deadline(id), None);
    }

    #[test]
    fn errors_outlive_info() {
        let (mut store, _) = store();
        let error = store.error("slow");
        let info = store.info("fast");

        assert!(store.deadline(error) > store.deadline(info));
    }

    #[test]
    fn update_keeps_id_and_position() {
        let (mut store, _) = store();
        let first = store.info("one");
        let loading = store.loading("Sending...");
        let last = store.info("three");

        let restarted = store.update(
            loading,
            NotificationPatch {
                kind: Some(NotificationKind::Success),
                message: Some("Sent".into()),
                ..NotificationPatch::default()
            },
        );

        assert_eq!(restarted, Some(true));
        assert_eq!(ids(&store), vec![first, loading, last]);
        assert_eq!(store.get(loading).unwrap().message.as_deref(), Some("Sent"));
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let (mut store, _) = store();
        assert_eq!(
            store.update(NotificationId::from_raw(3), NotificationPatch::default()),
            None
        );
    }

    #[test]
    fn timing_update_restarts_the_countdown() {
        let (mut store, clock) = store();
        let id = store.info("hello");

        clock.advance(Duration::from_millis(4000));
        store.update(
            id,
            NotificationPatch {
                duration_ms: Some(2000),
                ..NotificationPatch::default()
            },
        );

        clock.advance(Duration::from_millis(1900));
        assert!(store.expire().is_empty());
        clock.advance(Duration::from_millis(100));
        assert_eq!(store.expire(), vec![id]);
    }

    #[test]
    fn text_update_keeps_the_countdown_running() {
        let (mut store, clock) = store();
        let id = store.info("hello");

        clock.advance(Duration::from_millis(3000));
        let restarted = store.update(
            id,
            NotificationPatch {
                message: Some("hello again".into()),
                ..NotificationPatch::default()
            },
        );

        assert_eq!(restarted, Some(false));
        assert_eq!(store.remaining_percent(id), Some(40.0));
    }

    #[test]
    fn clear_all_empties_the_store() {
        let (mut store, _) = store();
        store.info("one");
        store.loading("two");

        store.clear_all();
        assert!(store.is_empty());
    }

    #[test]
    fn invoke_action_runs_the_callback() {
        let (mut store, _) = store();
        let clicked = Arc::new(AtomicBool::new(false));
        let flag = clicked.clone();
        let with_action = store.add(
            NotificationInput::titled(NotificationKind::Success, "Sent").action(
                NotificationAction::new("Share", move || flag.store(true, Ordering::SeqCst)),
            ),
        );
        let without_action = store.info("plain");

        assert!(!store.invoke_action(without_action));
        assert!(store.invoke_action(with_action));
        assert!(clicked.load(Ordering::SeqCst));
    }
}
