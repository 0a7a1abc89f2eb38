//! Redis Backend Module
//!
//! `CacheBackend` over a shared Redis instance. Every command runs under a
//! timeout; a timeout or connection error becomes `CacheError::Unavailable`,
//! which the coordinator treats as a miss.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Script};
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::cache::CacheBackend;
use crate::error::{CacheError, CacheResult};

/// Deletes every key matching `ARGV[1]`. Runs as one script, so no other
/// command interleaves with the group delete.
const DELETE_BY_PATTERN: &str = r#"
local removed = 0
local cursor = "0"
repeat
    local page = redis.call("SCAN", cursor, "MATCH", ARGV[1], "COUNT", 500)
    cursor = page[1]
    for _, key in ipairs(page[2]) do
        removed = removed + redis.call("DEL", key)
    end
until cursor == "0"
return removed
"#;

// == Redis Backend ==
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
    namespace: String,
    command_timeout: Duration,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("namespace", &self.namespace)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

impl RedisBackend {
    /// Connects to `url`. The initial handshake is bounded by the same
    /// timeout as individual commands.
    #[instrument(skip(namespace), level = "info", name = "connect_redis")]
    pub async fn connect(
        url: &str,
        namespace: impl Into<String>,
        timeout_ms: u64,
    ) -> CacheResult<Self> {
        let command_timeout = Duration::from_millis(timeout_ms.max(1));
        let client = Client::open(url)?;

        let manager = timeout(command_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                CacheError::Unavailable(format!(
                    "connecting to {} timed out after {}ms",
                    url,
                    command_timeout.as_millis()
                ))
            })??;

        debug!("Redis connection manager ready");
        Ok(Self {
            manager,
            namespace: namespace.into(),
            command_timeout,
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// Runs one Redis call under the command timeout.
    async fn bounded<T, F>(&self, op: &'static str, call: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match timeout(self.command_timeout, call).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Unavailable(format!(
                "{} timed out after {}ms",
                op,
                self.command_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.manager.clone();
        let key = self.namespaced(key);
        self.bounded("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> CacheResult<()> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidRequest(
                "TTL must be at least one second".to_string(),
            ));
        }

        let mut conn = self.manager.clone();
        let key = self.namespaced(key);
        self.bounded("SETEX", async move {
            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
        })
        .await
    }

    async fn delete_exact(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.manager.clone();
        let key = self.namespaced(key);
        let removed: i64 = self
            .bounded("DEL", async move { conn.del::<_, i64>(key).await })
            .await?;
        Ok(removed > 0)
    }

    async fn delete_by_prefix(&self, prefix: &str) -> CacheResult<usize> {
        let mut conn = self.manager.clone();
        let pattern = format!("{}*", escape_glob(&self.namespaced(prefix)));
        let removed: i64 = self
            .bounded("DELETE_BY_PATTERN", async move {
                let script = Script::new(DELETE_BY_PATTERN);
                script.arg(pattern).invoke_async(&mut conn).await
            })
            .await?;
        Ok(removed.max(0) as usize)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Escapes Redis glob metacharacters so a prefix matches literally.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
