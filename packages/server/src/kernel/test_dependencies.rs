// TestDependencies - mock implementations for testing
//
// Provides spy services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{BaseEmailService, ServerDeps};
use crate::domains::notifications::DispatchMode;

// =============================================================================
// Mock Email Service
// =============================================================================

/// One message handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every send attempt. Recipients registered with `failing_for`
/// (or every recipient after `fail_all`) get an error instead.
#[derive(Default)]
pub struct MockEmailService {
    sent: Mutex<Vec<SentEmail>>,
    attempts: Mutex<usize>,
    failing: Mutex<Vec<String>>,
    fail_all: Mutex<bool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sends to this address fail
    pub fn failing_for(self, address: &str) -> Self {
        self.failing.lock().unwrap().push(address.to_string());
        self
    }

    /// Make every send fail
    pub fn fail_all(self) -> Self {
        *self.fail_all.lock().unwrap() = true;
        self
    }

    /// Successfully delivered messages, in send order
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Delivered messages for one recipient
    pub fn sent_to(&self, address: &str) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == address)
            .cloned()
            .collect()
    }

    /// Number of send calls, including failed ones
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        *self.attempts.lock().unwrap() = 0;
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;

        let should_fail =
            *self.fail_all.lock().unwrap() || self.failing.lock().unwrap().iter().any(|a| a == to);
        if should_fail {
            anyhow::bail!("mock transport refused message to {}", to);
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundles the spies so tests can inspect them after building ServerDeps.
pub struct TestDependencies {
    pub email: Arc<MockEmailService>,
    pub dispatch_mode: DispatchMode,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    /// Notifications are awaited inline so tests can assert on them directly.
    pub fn new() -> Self {
        Self {
            email: Arc::new(MockEmailService::new()),
            dispatch_mode: DispatchMode::Inline,
        }
    }

    pub fn with_email(mut self, email: MockEmailService) -> Self {
        self.email = Arc::new(email);
        self
    }

    pub fn into_server_deps(&self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(db_pool, self.email.clone(), self.dispatch_mode)
    }
}
