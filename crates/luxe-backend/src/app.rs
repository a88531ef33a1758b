//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses back to the frontend bridge.

use std::sync::Arc;

use luxe_bridge::{MessageFromBackend, MessageToBackend};
use luxe_toast::Toaster;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::mail::Mailer;
use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Notifications shown to the user.
    pub toaster: Toaster,
    /// Delivers submitted forms.
    pub mailer: Arc<dyn Mailer>,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Frontend bridge closed, stopping backend");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::QuoteRequest(request) => {
                services::quote_service::handle_quote_request(self.clone(), request).await;
            }
            MessageToBackend::SubmitInquiry(form) => {
                services::inquiry_service::handle_inquiry_submission(self.clone(), form);
            }
            MessageToBackend::SubmitContact(form) => {
                services::contact_service::handle_contact_submission(self.clone(), form);
            }
            MessageToBackend::ShareQuoteRequest { request, channel } => {
                services::share_service::handle_share_request(self.clone(), request, channel)
                    .await;
            }
            MessageToBackend::DismissNotification(id) => {
                services::notification_service::handle_dismiss(self.clone(), id);
            }
            MessageToBackend::InvokeNotificationAction(id) => {
                services::notification_service::handle_action(self.clone(), id);
            }
            MessageToBackend::ClearNotifications => {
                services::notification_service::handle_clear(self.clone());
            }
        }
    }

    /// Forward every notification change to the frontend until the bridge
    /// closes.
    pub fn forward_notifications(self: &Arc<Self>) {
        let context = self.clone();
        let mut snapshots = self.toaster.subscribe();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let notifications = snapshots.borrow_and_update().clone();
                if !context
                    .send(MessageFromBackend::NotificationsChanged(notifications))
                    .await
                {
                    break;
                }
            }
        });
    }

    /// Send a message to the frontend bridge. Returns `false` once the
    /// frontend is gone.
    pub async fn send(&self, message: MessageFromBackend) -> bool {
        match self.tx.send(message).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Frontend is gone, dropping message: {:?}", e.0);
                false
            }
        }
    }
}
