//! User registration and lookup

use tracing::info;

use crate::common::{BookingError, BookingResult, UserId};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Register a user. Returns the existing record when the email is known.
pub async fn register_user(name: &str, email: &str, deps: &ServerDeps) -> BookingResult<User> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(BookingError::InvalidRequest(
            "name and email are required".to_string(),
        ));
    }

    if let Some(existing) = User::find_by_email(email, &deps.db_pool).await? {
        return Ok(existing);
    }

    let user = User::create(name, email, &deps.db_pool).await?;
    info!(user_id = %user.id, "User registered");
    Ok(user)
}

pub async fn get_user(id: UserId, deps: &ServerDeps) -> BookingResult<User> {
    User::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or(BookingError::NotFound("User"))
}
