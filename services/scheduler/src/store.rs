//! Record store abstractions for sports and sessions
//!
//! The services only talk to these traits. PostgreSQL repositories back
//! them in production and in-memory repositories back them in tests.
//! Listing methods return records in store-native (insertion) order.

use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Session, Sport};

pub trait SportStore: Send + Sync {
    fn list(&self) -> impl Future<Output = DatabaseResult<Vec<Sport>>> + Send;
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = DatabaseResult<Option<Sport>>> + Send;
    /// Exact, case-sensitive name match
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = DatabaseResult<Option<Sport>>> + Send;
    fn find_by_name_ignore_case(
        &self,
        name: &str,
    ) -> impl Future<Output = DatabaseResult<Option<Sport>>> + Send;
    fn insert(&self, sport: &Sport) -> impl Future<Output = DatabaseResult<()>> + Send;
    /// Overwrite a stored sport; `false` when the id is unknown
    fn save(&self, sport: &Sport) -> impl Future<Output = DatabaseResult<bool>> + Send;
    /// `false` when the id is unknown
    fn delete(&self, id: Uuid) -> impl Future<Output = DatabaseResult<bool>> + Send;
}

pub trait SessionStore: Send + Sync {
    fn insert(&self, session: &Session) -> impl Future<Output = DatabaseResult<()>> + Send;
    fn find_by_id(&self, id: Uuid)
    -> impl Future<Output = DatabaseResult<Option<Session>>> + Send;
    /// Overwrite a stored session; `false` when the id is unknown
    fn save(&self, session: &Session) -> impl Future<Output = DatabaseResult<bool>> + Send;
    /// `false` when the id is unknown
    fn delete(&self, id: Uuid) -> impl Future<Output = DatabaseResult<bool>> + Send;
    fn list_all(&self) -> impl Future<Output = DatabaseResult<Vec<Session>>> + Send;
    /// Sessions whose roster holds an entry for `email`
    fn list_by_player(
        &self,
        email: &str,
    ) -> impl Future<Output = DatabaseResult<Vec<Session>>> + Send;
    /// Sessions with at least one cancelled roster entry
    fn list_with_cancellations(&self) -> impl Future<Output = DatabaseResult<Vec<Session>>> + Send;
}
