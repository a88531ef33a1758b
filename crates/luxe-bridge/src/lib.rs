//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect a user-facing
//! frontend with the asynchronous backend responsible for quote estimation,
//! form submission and notification lifecycle.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., price a request, submit an inquiry,
//!   dismiss a notification).
//! - The backend pushes events (e.g., quote breakdowns, the current
//!   notification list, form validation results).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod forms;
pub mod notification;
pub mod sanitize;
pub mod share;

use luxe_quote::{PricingBreakdown, PricingRequest};
use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// Estimate for the most recent quote request.
    QuoteResponse {
        request: PricingRequest,
        breakdown: PricingBreakdown,
    },
    /// The full, ordered list of visible notifications. Sent after every
    /// change; the frontend replaces whatever it rendered before.
    NotificationsChanged(Vec<notification::Notification>),
    /// A submitted form failed validation or was rate limited. `errors` is
    /// empty when the form itself was fine.
    FormRejected {
        form: forms::FormKind,
        errors: Vec<forms::FieldError>,
    },
    /// A form was delivered; the frontend should reset it.
    SubmissionAccepted(forms::FormKind),
    /// Delivery of a valid form failed.
    SubmissionFailed {
        form: forms::FormKind,
        reason: String,
    },
    /// A deep link carrying a quote summary.
    ShareLinkResponse(share::ShareLink),
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Price a (possibly incomplete) request. Sent on every form change.
    QuoteRequest(PricingRequest),
    SubmitInquiry(forms::InquiryForm),
    SubmitContact(forms::ContactForm),
    /// Build a deep link that shares the quote for `request`.
    ShareQuoteRequest {
        request: PricingRequest,
        channel: share::ShareChannel,
    },
    DismissNotification(notification::NotificationId),
    /// Run the secondary action attached to a notification.
    InvokeNotificationAction(notification::NotificationId),
    ClearNotifications,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
