//! 存储接口定义
//!
//! 集合、有序集合与对象存储的最小契约，便于流水线依赖抽象并支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RewardPayload, ScoredMember};

/// 奖励存储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardStore: Send + Sync {
    // 集合
    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool>;
    async fn get_set_members(&self, key: &str) -> Result<Vec<String>>;

    // 有序集合
    /// 按分值区间 `[min, max]` 升序返回成员及分值，支持 `f64::INFINITY`
    async fn get_sorted_set_range_by_score_with_scores(
        &self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<ScoredMember>>;
    async fn sorted_set_incr_by(&self, key: &str, delta: f64, member: &str) -> Result<()>;

    // 对象
    /// 批量读取对象，结果与 `keys` 一一对应，不存在的对象为 `None`
    async fn get_objects(&self, keys: &[String]) -> Result<Vec<Option<RewardPayload>>>;
}
