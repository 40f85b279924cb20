//! Pending email verification codes
//!
//! Codes are keyed by email and expire after a TTL. Redis holds them in
//! production so a restart does not invalidate outstanding signups.

use anyhow::Result;
use common::cache::RedisPool;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

const CODE_NAMESPACE: &str = "verify";

pub trait CodeStore: Send + Sync {
    /// Store `code` for `email`, replacing any previous one
    fn put(&self, email: &str, code: &str, ttl: Duration)
    -> impl Future<Output = Result<()>> + Send;
    fn get(&self, email: &str) -> impl Future<Output = Result<Option<String>>> + Send;
    fn remove(&self, email: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Code store on top of the shared Redis cache
#[derive(Clone)]
pub struct RedisCodeStore {
    redis: RedisPool,
}

impl RedisCodeStore {
    pub fn new(redis: RedisPool) -> Self {
        Self { redis }
    }
}

impl CodeStore for RedisCodeStore {
    async fn put(&self, email: &str, code: &str, ttl: Duration) -> Result<()> {
        let key = self.redis.key(CODE_NAMESPACE, email);
        // SETEX rejects a zero TTL.
        self.redis.set(&key, code, Some(ttl.as_secs().max(1))).await
    }

    async fn get(&self, email: &str) -> Result<Option<String>> {
        self.redis.get(&self.redis.key(CODE_NAMESPACE, email)).await
    }

    async fn remove(&self, email: &str) -> Result<()> {
        self.redis
            .delete(&self.redis.key(CODE_NAMESPACE, email))
            .await
    }
}

#[derive(Debug)]
struct PendingCode {
    code: String,
    expires: Instant,
}

/// Process-local code store. Expired codes are dropped when read.
#[derive(Debug, Clone, Default)]
pub struct MemoryCodeStore {
    codes: Arc<Mutex<HashMap<String, PendingCode>>>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeStore for MemoryCodeStore {
    async fn put(&self, email: &str, code: &str, ttl: Duration) -> Result<()> {
        self.codes.lock().await.insert(
            email.to_string(),
            PendingCode {
                code: code.to_string(),
                expires: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<String>> {
        let mut codes = self.codes.lock().await;
        let now = Instant::now();

        match codes.get(email) {
            Some(pending) if now < pending.expires => Ok(Some(pending.code.clone())),
            Some(_) => {
                codes.remove(email);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, email: &str) -> Result<()> {
        self.codes.lock().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_replaces_and_remove_clears() -> Result<()> {
        let store = MemoryCodeStore::new();
        let ttl = Duration::from_secs(60);

        store.put("a@x.com", "111111", ttl).await?;
        store.put("a@x.com", "222222", ttl).await?;
        assert_eq!(store.get("a@x.com").await?, Some("222222".to_string()));
        assert_eq!(store.get("b@x.com").await?, None);

        store.remove("a@x.com").await?;
        assert_eq!(store.get("a@x.com").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_code_is_gone() -> Result<()> {
        let store = MemoryCodeStore::new();
        store.put("a@x.com", "111111", Duration::ZERO).await?;

        assert_eq!(store.get("a@x.com").await?, None);
        Ok(())
    }
}
