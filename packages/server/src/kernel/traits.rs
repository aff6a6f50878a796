// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Which messages to send, and to whom, is decided in domains/notifications.
//
// Naming convention: Base* for trait names (e.g., BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Email Trait (Infrastructure - notification transport)
// =============================================================================

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send a plain-text email. Best effort: an `Err` only means this one
    /// attempt failed; callers never retry.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}
