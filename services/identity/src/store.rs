//! Record store abstraction for user accounts

use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Role, User};

pub trait UserStore: Send + Sync {
    /// Exact email match
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = DatabaseResult<Option<User>>> + Send;
    /// Fails with `DatabaseError::Duplicate` when the email is taken
    fn insert(&self, user: &User) -> impl Future<Output = DatabaseResult<()>> + Send;
    /// Overwrite a stored user; `false` when the id is unknown
    fn save(&self, user: &User) -> impl Future<Output = DatabaseResult<bool>> + Send;
    /// `false` when the id is unknown
    fn delete(&self, id: Uuid) -> impl Future<Output = DatabaseResult<bool>> + Send;
    /// Users holding `role`, oldest first
    fn list_by_role(&self, role: Role) -> impl Future<Output = DatabaseResult<Vec<User>>> + Send;
}
