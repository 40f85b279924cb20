//! In-memory user repository, kept in insertion order

use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{Role, User},
    store::UserStore,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> DatabaseResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|stored| stored.email == user.email) {
            return Err(DatabaseError::Duplicate("users"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> DatabaseResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|stored| stored.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id != id);
        Ok(users.len() != before)
    }

    async fn list_by_role(&self, role: Role) -> DatabaseResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_save_and_role_listing() {
        let repo = MemoryUserRepository::new();
        let mut ann = User::new("Ann", "a@x.com", "h".into(), Role::Player, Utc::now());
        let bob = User::new("Bob", "b@x.com", "h".into(), Role::Admin, Utc::now());
        repo.insert(&ann).await.unwrap();
        repo.insert(&bob).await.unwrap();

        ann.is_verified = true;
        assert!(repo.save(&ann).await.unwrap());
        assert!(
            repo.find_by_email("a@x.com")
                .await
                .unwrap()
                .unwrap()
                .is_verified
        );

        let players = repo.list_by_role(Role::Player).await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].email, "a@x.com");

        let ghost = User::new("Gus", "g@x.com", "h".into(), Role::Player, Utc::now());
        assert!(!repo.save(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_email_unique_and_delete() {
        let repo = MemoryUserRepository::new();
        let ann = User::new("Ann", "a@x.com", "h".into(), Role::Player, Utc::now());
        repo.insert(&ann).await.unwrap();

        let twin = User::new("Ann Two", "a@x.com", "h".into(), Role::Player, Utc::now());
        assert!(matches!(
            repo.insert(&twin).await,
            Err(DatabaseError::Duplicate("users"))
        ));

        assert!(repo.delete(ann.id).await.unwrap());
        assert!(!repo.delete(ann.id).await.unwrap());
        assert_eq!(repo.find_by_email("a@x.com").await.unwrap(), None);
        repo.insert(&twin).await.unwrap();
    }
}
