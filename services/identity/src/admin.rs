//! Administrator provisioning

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::{IdentityError, IdentityResult},
    models::{Role, User},
    password::hash_password,
    store::UserStore,
    validation::{validate_email, validate_fullname, validate_password},
};

/// What provisioning did to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvision {
    Created,
    /// An existing account was given the admin role and marked verified
    Promoted,
    /// Already a verified admin
    Unchanged,
}

/// Create a verified admin account, or promote the existing account with
/// that email. The password of an existing account is left untouched.
pub async fn provision_admin<U: UserStore>(
    users: &U,
    fullname: &str,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> IdentityResult<AdminProvision> {
    let email = email.trim();
    validate_email(email).map_err(IdentityError::Validation)?;

    if let Some(mut existing) = users.find_by_email(email).await? {
        if existing.role == Role::Admin && existing.is_verified {
            return Ok(AdminProvision::Unchanged);
        }

        existing.role = Role::Admin;
        existing.is_verified = true;
        existing.updated_at = now;
        if !users.save(&existing).await? {
            return Err(IdentityError::UserNotFound);
        }

        info!(user_id = %existing.id, email = %email, "Promoted account to admin");
        return Ok(AdminProvision::Promoted);
    }

    validate_fullname(fullname).map_err(IdentityError::Validation)?;
    validate_password(password).map_err(IdentityError::Validation)?;

    let password_hash =
        hash_password(password).map_err(|e| IdentityError::Hashing(e.to_string()))?;
    let mut admin = User::new(fullname.trim(), email, password_hash, Role::Admin, now);
    admin.is_verified = true;
    users.insert(&admin).await?;

    info!(user_id = %admin.id, email = %email, "Created admin account");
    Ok(AdminProvision::Created)
}
