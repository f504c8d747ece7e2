//! Redis 奖励存储
//!
//! 集合使用 Redis SET，用户进度使用 ZSET，奖励定义使用 HASH。

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use reward_shared::cache::Cache;
use serde_json::Value;
use tracing::instrument;

use super::traits::RewardStore;
use crate::error::Result;
use crate::models::{RewardPayload, ScoredMember};

/// 基于 Redis 的奖励存储
#[derive(Clone)]
pub struct RedisRewardStore {
    cache: Cache,
}

impl RedisRewardStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

/// 将分值边界转换为 Redis 区间参数
fn score_arg(score: f64) -> String {
    if score == f64::INFINITY {
        "+inf".to_string()
    } else if score == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        score.to_string()
    }
}

/// 空哈希在 Redis 中等价于不存在
fn hash_to_payload(hash: HashMap<String, String>) -> Option<RewardPayload> {
    if hash.is_empty() {
        return None;
    }
    Some(
        hash.into_iter()
            .map(|(field, value)| (field, Value::String(value)))
            .collect(),
    )
}

#[async_trait]
impl RewardStore for RedisRewardStore {
    #[instrument(skip(self))]
    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.cache.connection().await?;
        let is_member: bool = conn.sismember(key, value).await?;
        Ok(is_member)
    }

    #[instrument(skip(self))]
    async fn get_set_members(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.cache.connection().await?;
        let members: Vec<String> = conn.smembers(key).await?;
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn get_sorted_set_range_by_score_with_scores(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<ScoredMember>> {
        let mut conn = self.cache.connection().await?;
        let pairs: Vec<(String, f64)> = conn
            .zrangebyscore_withscores(key, score_arg(min), score_arg(max))
            .await?;
        Ok(pairs
            .into_iter()
            .map(|(value, score)| ScoredMember { value, score })
            .collect())
    }

    #[instrument(skip(self))]
    async fn sorted_set_incr_by(&self, key: &str, delta: f64, member: &str) -> Result<()> {
        let mut conn = self.cache.connection().await?;
        let _: f64 = conn.zincr(key, member, delta).await?;
        Ok(())
    }

    #[instrument(skip(self, keys), fields(count = keys.len()))]
    async fn get_objects(&self, keys: &[String]) -> Result<Vec<Option<RewardPayload>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.cache.connection().await?;
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.hgetall(key);
        }
        let hashes: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

        Ok(hashes.into_iter().map(hash_to_payload).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_arg() {
        assert_eq!(score_arg(f64::INFINITY), "+inf");
        assert_eq!(score_arg(f64::NEG_INFINITY), "-inf");
        assert_eq!(score_arg(1.0), "1");
        assert_eq!(score_arg(2.5), "2.5");
    }

    #[test]
    fn test_hash_to_payload() {
        assert!(hash_to_payload(HashMap::new()).is_none());

        let hash = HashMap::from([("points".to_string(), "10".to_string())]);
        let payload = hash_to_payload(hash).unwrap();
        assert_eq!(payload.get("points"), Some(&Value::String("10".to_string())));
    }
}
