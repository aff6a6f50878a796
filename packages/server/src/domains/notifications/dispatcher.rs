//! Best-effort email delivery for booking events.
//!
//! A send is attempted once. Failures are logged and dropped; they never
//! reach the operation that triggered them.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::kernel::BaseEmailService;

use super::messages::Email;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification delivery to {to} failed: {source}")]
    DeliveryFailed {
        to: String,
        #[source]
        source: anyhow::Error,
    },
}

/// How a batch is handed to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Spawn a task and return immediately
    #[default]
    Background,
    /// Await delivery before returning; failures are still swallowed
    Inline,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    email: Arc<dyn BaseEmailService>,
    mode: DispatchMode,
}

impl NotificationDispatcher {
    pub fn new(email: Arc<dyn BaseEmailService>, mode: DispatchMode) -> Self {
        Self { email, mode }
    }

    pub async fn dispatch(&self, emails: Vec<Email>) {
        if emails.is_empty() {
            return;
        }

        match self.mode {
            DispatchMode::Inline => {
                deliver_all(self.email.as_ref(), emails).await;
            }
            DispatchMode::Background => {
                tokio::spawn({
                    let email = self.email.clone();
                    async move {
                        deliver_all(email.as_ref(), emails).await;
                    }
                });
            }
        }
    }
}

async fn deliver(transport: &dyn BaseEmailService, email: &Email) -> Result<(), NotificationError> {
    transport
        .send(&email.to, &email.subject, &email.body)
        .await
        .map_err(|source| NotificationError::DeliveryFailed {
            to: email.to.clone(),
            source,
        })
}

/// Sends each message in order and returns how many were delivered.
async fn deliver_all(transport: &dyn BaseEmailService, emails: Vec<Email>) -> usize {
    let total = emails.len();
    let mut delivered = 0;

    for email in &emails {
        match deliver(transport, email).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!(error = %e, subject = %email.subject, "Notification not delivered"),
        }
    }

    debug!(delivered, total, "Notification batch finished");
    delivered
}
