//! In-memory backend used by service tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use luxe_bridge::{MessageFromBackend, config::Config};
use luxe_toast::Toaster;
use tokio::sync::{
    RwLock,
    mpsc::{self, Receiver},
};

use super::AppContextHandle;
use crate::{
    app::AppContext,
    mail::{MailError, MailTemplate, Mailer, TemplateParams},
    state::State,
};

/// Keeps every message it is asked to send, optionally rejecting them all.
#[derive(Default)]
pub(crate) struct RecordingMailer {
    pub sent: Mutex<Vec<(MailTemplate, TemplateParams)>>,
    pub reject: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, template: MailTemplate, params: TemplateParams) -> Result<(), MailError> {
        self.sent.lock().unwrap().push((template, params));
        if self.reject {
            return Err(MailError::Rejected {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "The template ID is invalid".into(),
            });
        }
        Ok(())
    }
}

pub(crate) struct TestBackend {
    pub context: AppContextHandle,
    pub mailer: Arc<RecordingMailer>,
    rx: Receiver<MessageFromBackend>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_mailer(RecordingMailer::default())
    }

    pub fn rejecting() -> Self {
        Self::with_mailer(RecordingMailer {
            reject: true,
            ..RecordingMailer::default()
        })
    }

    fn with_mailer(mailer: RecordingMailer) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let mailer = Arc::new(mailer);
        let context = Arc::new(AppContext {
            state: Arc::new(RwLock::new(State::new(Config::default()))),
            toaster: Toaster::new(),
            mailer: mailer.clone(),
            tx,
        });

        Self {
            context,
            mailer,
            rx,
        }
    }

    pub async fn next_message(&mut self) -> MessageFromBackend {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("backend sent nothing")
            .expect("bridge closed")
    }

    pub fn try_next_message(&mut self) -> Option<MessageFromBackend> {
        self.rx.try_recv().ok()
    }

    pub fn sent_mail(&self) -> Vec<(MailTemplate, TemplateParams)> {
        self.mailer.sent.lock().unwrap().clone()
    }
}
