//! Redis 连接管理模块
//!
//! 提供 Redis 客户端与多路复用连接的获取，具体的数据访问由上层仓储实现。

use crate::config::RedisConfig;
use crate::error::Result;
use redis::Client;
use redis::aio::MultiplexedConnection;
use tracing::info;

/// Redis 客户端
#[derive(Clone)]
pub struct Cache {
    client: Client,
}

impl Cache {
    /// 创建 Redis 客户端
    ///
    /// 只校验 URL，不会立即建立连接
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        info!("Redis client created");
        Ok(Self { client })
    }

    /// 获取多路复用连接
    pub async fn connection(&self) -> Result<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let config = RedisConfig {
            url: "not-a-redis-url".to_string(),
        };
        assert!(Cache::new(&config).is_err());
    }

    #[test]
    fn test_valid_url_accepted() {
        assert!(Cache::new(&RedisConfig::default()).is_ok());
    }
}
