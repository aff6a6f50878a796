//! Server dependencies for activities (using traits for testability)
//!
//! Built once in `main` and shared behind an `Arc`. All external services
//! sit behind trait objects so tests can swap in spies.

use anyhow::Result;
use async_trait::async_trait;
use mailer::MailerService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::notifications::{DispatchMode, NotificationDispatcher};
use crate::kernel::BaseEmailService;

// =============================================================================
// MailerService Adapter (implements BaseEmailService trait)
// =============================================================================

/// Wrapper around MailerService that implements BaseEmailService trait
pub struct MailerAdapter(pub Arc<MailerService>);

impl MailerAdapter {
    pub fn new(service: Arc<MailerService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseEmailService for MailerAdapter {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.0
            .send_text(to, subject, body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub email_service: Arc<dyn BaseEmailService>,
    /// Sends booking notifications; never reports failure to the caller
    pub notifier: NotificationDispatcher,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        email_service: Arc<dyn BaseEmailService>,
        dispatch_mode: DispatchMode,
    ) -> Self {
        let notifier = NotificationDispatcher::new(email_service.clone(), dispatch_mode);
        Self {
            db_pool,
            email_service,
            notifier,
        }
    }
}
