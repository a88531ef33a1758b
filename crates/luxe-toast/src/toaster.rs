use std::{
    collections::HashMap,
    fmt::Display,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use luxe_bridge::notification::{
    Notification, NotificationAction, NotificationId, NotificationInput, NotificationKind,
    NotificationPatch,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, sleep_until},
};

use crate::{clock::TokioClock, store::NotificationStore};

const DEFAULT_LOADING: &str = "Processing...";
const DEFAULT_SUCCESS: &str = "Operation completed successfully!";
const DEFAULT_ERROR: &str = "Operation failed!";

/// Messages shown while and after a [`Toaster::promise`] runs. Unset
/// messages fall back to generic text; an unset error message uses the
/// operation's error.
#[derive(Debug, Clone, Default)]
pub struct PromiseMessages {
    pub loading: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    /// Attached to the success notification.
    pub success_action: Option<NotificationAction>,
}

impl PromiseMessages {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn loading(mut self, message: impl Into<String>) -> Self {
        self.loading = Some(message.into());
        self
    }

    #[must_use]
    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }

    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    #[must_use]
    pub fn success_action(mut self, action: NotificationAction) -> Self {
        self.success_action = Some(action);
        self
    }
}

struct Inner {
    store: Mutex<NotificationStore<TokioClock>>,
    timers: Mutex<HashMap<NotificationId, JoinHandle<()>>>,
    snapshots: watch::Sender<Vec<Notification>>,
}

/// Process-wide notification manager.
///
/// Cloning yields another handle to the same notifications. Auto-dismissing
/// notifications get their own sleeping task, aborted when the notification
/// goes away first. Every change publishes the ordered list to
/// [`Toaster::subscribe`]rs.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Inner>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(NotificationStore::default()),
                timers: Mutex::new(HashMap::new()),
                snapshots,
            }),
        }
    }

    /// Receiver that always holds the latest ordered notification list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.snapshots.subscribe()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.store().notifications()
    }

    pub fn remaining_percent(&self, id: NotificationId) -> Option<f64> {
        self.store().remaining_percent(id)
    }

    /// Shows a notification and returns its id.
    pub fn add(&self, input: NotificationInput) -> NotificationId {
        let (id, deadline) = {
            let mut store = self.store();
            let id = store.add(input);
            (id, store.deadline(id))
        };
        log::debug!("notification {id} added");

        if let Some(deadline) = deadline {
            self.schedule(id, deadline);
        }
        self.publish();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Success, message))
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Error, message))
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Warning, message))
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Info, message))
    }

    pub fn loading(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationInput::titled(NotificationKind::Loading, message))
    }

    /// Removes a notification and cancels its countdown. Unknown ids are
    /// ignored.
    pub fn remove(&self, id: NotificationId) {
        self.cancel(id);
        if self.store().remove(id) {
            log::debug!("notification {id} removed");
            self.publish();
        }
    }

    /// Merges `patch` into a notification without moving it. Unknown ids are
    /// ignored.
    pub fn update(&self, id: NotificationId, patch: NotificationPatch) {
        let (restarted, deadline) = {
            let mut store = self.store();
            let Some(restarted) = store.update(id, patch) else {
                return;
            };
            (restarted, store.deadline(id))
        };

        if restarted {
            self.cancel(id);
            if let Some(deadline) = deadline {
                self.schedule(id, deadline);
            }
        }
        self.publish();
    }

    /// Removes every notification and cancels all countdowns.
    pub fn clear_all(&self) {
        for (_, timer) in self.timers().drain() {
            timer.abort();
        }
        self.store().clear_all();
        self.publish();
    }

    /// Runs the secondary action of a notification. Returns `false` when it
    /// has none.
    pub fn invoke_action(&self, id: NotificationId) -> bool {
        // run outside the lock; the action may notify again
        let action = self.store().action(id);
        match action {
            Some(action) => {
                log::debug!("running action {:?} of notification {id}", action.label);
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Shows a loading notification while `operation` runs, then replaces it
    /// with a success or error notification.
    ///
    /// The operation's result is returned unchanged, so callers still see
    /// the error after it has been shown.
    pub async fn promise<F, T, E>(&self, operation: F, messages: PromiseMessages) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let loading = self.loading(messages.loading.as_deref().unwrap_or(DEFAULT_LOADING));

        let result = operation.await;
        self.remove(loading);

        match &result {
            Ok(_) => {
                let mut input = NotificationInput::titled(
                    NotificationKind::Success,
                    messages.success.as_deref().unwrap_or(DEFAULT_SUCCESS),
                );
                input.action = messages.success_action;
                self.add(input);
            }
            Err(error) => {
                let message = match messages.error {
                    Some(message) => message,
                    None => {
                        let text = error.to_string();
                        if text.is_empty() {
                            DEFAULT_ERROR.to_string()
                        } else {
                            text
                        }
                    }
                };
                self.error(message);
            }
        }

        result
    }

    /// Like [`Toaster::promise`], starting the operation only once the
    /// loading notification is visible.
    pub async fn promise_with<F, Fut, T, E>(
        &self,
        operation: F,
        messages: PromiseMessages,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.promise(async move { operation().await }, messages)
            .await
    }

    fn schedule(&self, id: NotificationId, deadline: std::time::Instant) {
        let inner = Arc::downgrade(&self.inner);
        let timer = tokio::spawn(async move {
            sleep_until(Instant::from_std(deadline)).await;
            expire(inner, id);
        });

        if let Some(previous) = self.timers().insert(id, timer) {
            previous.abort();
        }
    }

    fn cancel(&self, id: NotificationId) {
        if let Some(timer) = self.timers().remove(&id) {
            timer.abort();
        }
    }

    fn publish(&self) {
        let snapshot = self.store().notifications();
        self.inner.snapshots.send_replace(snapshot);
    }

    fn store(&self) -> MutexGuard<'_, NotificationStore<TokioClock>> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<NotificationId, JoinHandle<()>>> {
        self.inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Body of a countdown task once its deadline has passed.
fn expire(inner: Weak<Inner>, id: NotificationId) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let toaster = Toaster { inner };

    toaster.timers().remove(&id);
    let expired = toaster.store().expire();
    if !expired.is_empty() {
        log::debug!("notifications expired: {expired:?}");
        toaster.publish();
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt, time::Duration};

    use super::*;

    #[derive(Debug)]
    struct Boom(&'static str);

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    fn kinds(toaster: &Toaster) -> Vec<NotificationKind> {
        toaster
            .notifications()
            .iter()
            .map(|notification| notification.kind)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn notification_expires_after_its_duration() {
        let toaster = Toaster::new();
        let id = toaster.success("Saved");

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(toaster.remaining_percent(id), Some(50.0));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        tokio::task::yield_now().await;
        assert!(toaster.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_notification_stays() {
        let toaster = Toaster::new();
        toaster.add(NotificationInput::new(NotificationKind::Loading).duration_ms(5000));

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(kinds(&toaster), vec![NotificationKind::Loading]);
    }

    #[tokio::test(start_paused = true)]
    async fn removal_cancels_the_countdown() {
        let toaster = Toaster::new();
        let id = toaster.info("bye");
        toaster.remove(id);
        toaster.remove(id);

        assert!(toaster.timers().is_empty());
        assert!(toaster.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_latest_ordered_list() {
        let toaster = Toaster::new();
        let mut snapshots = toaster.subscribe();

        let first = toaster.info("one");
        let second = toaster.info("two");
        let third = toaster.info("three");
        toaster.remove(second);

        assert!(snapshots.has_changed().unwrap());
        let ids: Vec<_> = snapshots
            .borrow_and_update()
            .iter()
            .map(|notification| notification.id)
            .collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[tokio::test(start_paused = true)]
    async fn update_to_success_starts_the_countdown() {
        let toaster = Toaster::new();
        let id = toaster.loading("Working...");

        tokio::time::sleep(Duration::from_secs(60)).await;
        toaster.update(
            id,
            NotificationPatch {
                kind: Some(NotificationKind::Success),
                ..NotificationPatch::default()
            },
        );
        assert_eq!(toaster.remaining_percent(id), Some(100.0));

        tokio::time::sleep(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(toaster.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_all_cancels_every_countdown() {
        let toaster = Toaster::new();
        toaster.info("one");
        toaster.error("two");
        toaster.loading("three");

        toaster.clear_all();
        assert!(toaster.notifications().is_empty());
        assert!(toaster.timers().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn promise_success_replaces_loading() {
        let toaster = Toaster::new();
        let mut snapshots = toaster.subscribe();

        let operation = {
            let toaster = toaster.clone();
            let mut snapshots = snapshots.clone();
            async move {
                snapshots.changed().await.unwrap();
                assert_eq!(kinds(&toaster), vec![NotificationKind::Loading]);
                Ok::<_, Boom>("ok")
            }
        };

        let result = toaster
            .promise(operation, PromiseMessages::new().success("Done"))
            .await;

        assert_eq!(result.unwrap(), "ok");
        let notifications = snapshots.borrow_and_update().clone();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert_eq!(notifications[0].message.as_deref(), Some("Done"));
    }

    #[tokio::test(start_paused = true)]
    async fn promise_failure_shows_and_returns_the_error() {
        let toaster = Toaster::new();

        let result: Result<(), Boom> = toaster
            .promise(async { Err(Boom("boom")) }, PromiseMessages::new())
            .await;

        assert_eq!(result.unwrap_err().0, "boom");
        let notifications = toaster.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Error);
        assert_eq!(notifications[0].message.as_deref(), Some("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn promise_failure_prefers_the_given_message() {
        let toaster = Toaster::new();

        let _ = toaster
            .promise(
                async { Err::<(), _>(Boom("")) },
                PromiseMessages::new().error("Failed to send inquiry. Please try again."),
            )
            .await;

        assert_eq!(
            toaster.notifications()[0].message.as_deref(),
            Some("Failed to send inquiry. Please try again.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_error_text_falls_back() {
        let toaster = Toaster::new();

        let _ = toaster
            .promise(async { Err::<(), _>(Boom("")) }, PromiseMessages::new())
            .await;

        assert_eq!(
            toaster.notifications()[0].message.as_deref(),
            Some(DEFAULT_ERROR)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn promise_with_starts_after_loading_is_shown() {
        let toaster = Toaster::new();
        let observer = toaster.clone();

        let seen = toaster
            .promise_with(
                move || {
                    let seen = kinds(&observer);
                    async move { Ok::<_, Boom>(seen) }
                },
                PromiseMessages::new(),
            )
            .await
            .unwrap();

        assert_eq!(seen, vec![NotificationKind::Loading]);
        assert_eq!(
            toaster.notifications()[0].message.as_deref(),
            Some(DEFAULT_SUCCESS)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn other_notifications_expire_while_a_promise_is_pending() {
        let toaster = Toaster::new();
        toaster.info("short lived");

        let result = toaster
            .promise(
                async {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok::<_, Boom>(())
                },
                PromiseMessages::new(),
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(kinds(&toaster), vec![NotificationKind::Success]);
    }
}
