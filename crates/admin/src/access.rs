//! Back-office access control.

use gimco_core::{Shop, UserId, UserProfile};
use tracing::warn;

use crate::error::AdminError;

/// Ensure `user` may use the admin panel.
///
/// # Errors
///
/// Returns `AdminError::Forbidden` for customers.
pub fn require_admin(user: &UserProfile) -> Result<&UserProfile, AdminError> {
    if user.is_admin() {
        Ok(user)
    } else {
        warn!(user_id = %user.id, "Admin access denied");
        Err(AdminError::Forbidden(user.id.to_string()))
    }
}

/// Look up a user by id and ensure they are staff.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for unknown ids and
/// `AdminError::Forbidden` for customers.
pub fn authorize<'a>(shop: &'a Shop, user_id: &UserId) -> Result<&'a UserProfile, AdminError> {
    let user = shop
        .customer(user_id)
        .ok_or_else(|| AdminError::NotFound(format!("user {user_id}")))?;
    require_admin(user)
}
