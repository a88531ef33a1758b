//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, the notification
//! manager and the message dispatch loop that listens to frontend bridge
//! requests.

use std::{sync::Arc, thread};

use luxe_bridge::{MessageFromBackend, MessageToBackend, config::Config};
use luxe_toast::Toaster;
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::mail::EmailJsMailer;
use crate::state::State;

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config = match crate::config::load_config().await {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration, using defaults: {e}");
            Config::default()
        }
    };

    let missing = config.mail.missing_keys();
    if !missing.is_empty() {
        log::warn!(
            "Mail delivery is not configured, submissions will fail until {} are set",
            missing.join(", ")
        );
    }

    let mailer = EmailJsMailer::new(reqwest::Client::new(), config.mail.clone());
    let state = Arc::new(RwLock::new(State::new(config)));

    let context = Arc::new(AppContext {
        state,
        toaster: Toaster::new(),
        mailer: Arc::new(mailer),
        tx,
    });
    context.forward_notifications();
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
///
/// The backend runs on its own thread with a single-threaded runtime; every
/// handler and timer is interleaved on that one thread.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to build tokio runtime: {e}");
                return;
            }
        };
        runtime.block_on(async { setup_backend(rx, tx).await });
    })
}
