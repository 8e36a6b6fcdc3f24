use std::time::Duration;

use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Connection, Pool};

use otpgate_totp::{KeyValueStore, SetOutcome, StoreError};

/// Redis-backed [`KeyValueStore`].
#[derive(Clone)]
pub struct RedisStore {
    pub pool: Pool,
}

fn unavailable<E>(e: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::Unavailable(e.into())
}

/// Redis rejects a zero expiry.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

impl RedisStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build a pool from a `redis://` URL. Connections are opened lazily.
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let pool = deadpool_redis::Config::from_url(url)
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<Connection, StoreError> {
        self.pool.get().await.map_err(unavailable)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn().await?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let (): () = match ttl {
            Some(ttl) => conn.set_ex(key, value.to_vec(), ttl_secs(ttl)).await,
            None => conn.set(key, value.to_vec()).await,
        }
        .map_err(unavailable)?;
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<SetOutcome, StoreError> {
        let mut conn = self.conn().await?;
        // SET NX EX replies OK when written and nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value.to_vec())
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(match reply {
            Some(_) => SetOutcome::Claimed,
            None => SetOutcome::AlreadyPresent,
        })
    }
}
