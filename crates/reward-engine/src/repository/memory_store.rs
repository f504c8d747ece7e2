//! 进程内奖励存储
//!
//! 语义与 Redis 实现保持一致，供集成测试和本地调试使用。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::RewardStore;
use crate::error::Result;
use crate::models::{RewardPayload, ScoredMember};

#[derive(Default)]
struct StoreState {
    sets: HashMap<String, HashSet<String>>,
    sorted_sets: HashMap<String, HashMap<String, f64>>,
    objects: HashMap<String, RewardPayload>,
}

/// 内存奖励存储
#[derive(Default)]
pub struct InMemoryRewardStore {
    state: RwLock<StoreState>,
}

impl InMemoryRewardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 向集合添加成员
    pub fn add_set_member(&self, key: &str, value: &str) {
        self.state
            .write()
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string());
    }

    /// 从集合移除成员
    pub fn remove_set_member(&self, key: &str, value: &str) {
        if let Some(set) = self.state.write().sets.get_mut(key) {
            set.remove(value);
        }
    }

    /// 写入对象（覆盖）
    pub fn set_object(&self, key: &str, object: RewardPayload) {
        self.state.write().objects.insert(key.to_string(), object);
    }

    /// 直接设置有序集合成员分值
    pub fn set_score(&self, key: &str, member: &str, score: f64) {
        self.state
            .write()
            .sorted_sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);
    }

    /// 读取有序集合成员分值
    pub fn score(&self, key: &str, member: &str) -> Option<f64> {
        self.state
            .read()
            .sorted_sets
            .get(key)
            .and_then(|set| set.get(member))
            .copied()
    }
}

#[async_trait]
impl RewardStore for InMemoryRewardStore {
    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool> {
        Ok(self
            .state
            .read()
            .sets
            .get(key)
            .is_some_and(|set| set.contains(value)))
    }

    async fn get_set_members(&self, key: &str) -> Result<Vec<String>> {
        let state = self.state.read();
        let mut members: Vec<String> = state
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        Ok(members)
    }

    async fn get_sorted_set_range_by_score_with_scores(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<ScoredMember>> {
        let state = self.state.read();
        let mut members: Vec<ScoredMember> = state
            .sorted_sets
            .get(key)
            .map(|set| {
                set.iter()
                    .filter(|(_, score)| **score >= min && **score <= max)
                    .map(|(value, score)| ScoredMember {
                        value: value.clone(),
                        score: *score,
                    })
                    .collect()
            })
            .unwrap_or_default();
        // 与 Redis 一致：分值升序，同分按成员字典序
        members.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.value.cmp(&b.value)));
        Ok(members)
    }

    async fn sorted_set_incr_by(&self, key: &str, delta: f64, member: &str) -> Result<()> {
        *self
            .state
            .write()
            .sorted_sets
            .entry(key.to_string())
            .or_default()
            .entry(member.to_string())
            .or_insert(0.0) += delta;
        Ok(())
    }

    async fn get_objects(&self, keys: &[String]) -> Result<Vec<Option<RewardPayload>>> {
        let state = self.state.read();
        Ok(keys.iter().map(|key| state.objects.get(key).cloned()).collect())
    }
}
