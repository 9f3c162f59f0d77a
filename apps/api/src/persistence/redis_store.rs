use async_trait::async_trait;
use redis::AsyncCommands;
use redis::Client as RedisClient;

use crate::persistence::store::{KeyValueStore, StoreError};

/// Redis-backed store, used when `REDIS_URL` is configured.
/// Keys are namespaced so a shared instance does not collide with other data.
pub struct RedisStore {
    client: RedisClient,
    namespace: String,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: RedisClient::open(url)?,
            namespace: "resumaster".to_string(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(self.namespaced(key)).await?;
        Ok(())
    }
}
