//! 奖励评估引擎
//!
//! 用户完成某个触发动作后调用，判断是否满足奖励条件并发放奖励。
//!
//! ## 处理流程
//!
//! 1. 条件开关：条件不在 `conditions:active` 中时直接返回
//! 2. 候选奖励：读取条件关联的奖励 ID 并批量加载奖励定义
//! 3. 领取过滤：按用户进度快照剔除已达领取上限的奖励
//! 4. 条件判定：并发调用谓词取值，经 `rewards.checkConditional:{conditional}` 判定
//! 5. 发放：逐个触发 `rewards.award:{rid}`，随后累加用户领取次数
//!
//! 每次调用都从存储读取最新状态，引擎本身不持有可变状态，可被并发调用。
//! 发放通知与计数累加之间没有事务保护，中途失败会留下不一致。

use std::sync::Arc;

use futures::future::try_join_all;
use reward_shared::observability::metrics;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::predicate::Predicate;
use crate::error::Result;
use crate::hooks::{HookDispatcher, award_hook, check_conditional_hook};
use crate::models::{RewardDefinition, UserRewardProgress};
use crate::repository::{RewardKeys, RewardStore};

/// 单次评估结果
#[derive(Debug, Clone, PartialEq)]
pub enum RewardOutcome {
    /// 条件未激活
    ConditionInactive,
    /// 没有可领取的候选奖励
    NoCandidates,
    /// 已完成判定，`awarded` 为按顺序发放的奖励
    Evaluated {
        candidates: usize,
        awarded: Vec<RewardDefinition>,
    },
}

impl RewardOutcome {
    /// 已发放的奖励
    pub fn awarded(&self) -> &[RewardDefinition] {
        match self {
            Self::Evaluated { awarded, .. } => awarded,
            _ => &[],
        }
    }

    fn metric_label(&self) -> &'static str {
        match self {
            Self::ConditionInactive => "inactive",
            Self::NoCandidates => "no_candidates",
            Self::Evaluated { .. } => "evaluated",
        }
    }
}

/// 奖励评估引擎
#[derive(Clone)]
pub struct RewardEngine {
    store: Arc<dyn RewardStore>,
    hooks: Arc<dyn HookDispatcher>,
}

impl RewardEngine {
    pub fn new(store: Arc<dyn RewardStore>, hooks: Arc<dyn HookDispatcher>) -> Self {
        Self { store, hooks }
    }

    /// 主入口：检查条件并为用户发放奖励
    ///
    /// 存储、Hook 或谓词的任何错误都原样返回。
    pub async fn check_condition_and_reward_user(
        &self,
        uid: &str,
        condition: &str,
        predicate: Predicate,
    ) -> Result<()> {
        self.evaluate(uid, condition, predicate).await.map(|_| ())
    }

    /// 与 `check_condition_and_reward_user` 相同，但返回评估结果
    #[instrument(skip(self, predicate))]
    pub async fn evaluate(
        &self,
        uid: &str,
        condition: &str,
        predicate: Predicate,
    ) -> Result<RewardOutcome> {
        match self.run(uid, condition, &predicate).await {
            Ok(outcome) => {
                metrics::record_reward_evaluation(outcome.metric_label());
                Ok(outcome)
            }
            Err(e) => {
                metrics::record_reward_evaluation("failed");
                warn!(error = %e, "奖励评估失败");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        uid: &str,
        condition: &str,
        predicate: &Predicate,
    ) -> Result<RewardOutcome> {
        // 1. 条件开关
        if !self.is_condition_active(condition).await? {
            debug!("条件未激活，跳过");
            return Ok(RewardOutcome::ConditionInactive);
        }

        // 2. 候选奖励
        let ids = self.reward_ids_by_condition(condition).await?;
        if ids.is_empty() {
            debug!("条件没有关联奖励");
            return Ok(RewardOutcome::NoCandidates);
        }
        let rewards = self.rewards_by_ids(&ids).await?;

        // 3. 领取过滤
        let candidates = self.filter_completed_rewards(uid, rewards).await?;
        if candidates.is_empty() {
            debug!("没有可领取的候选奖励");
            return Ok(RewardOutcome::NoCandidates);
        }

        // 4. 并发判定，任一失败则整体失败
        let verdicts = try_join_all(
            candidates
                .iter()
                .map(|reward| self.check_condition(reward, predicate)),
        )
        .await?;

        let eligible: Vec<RewardDefinition> = candidates
            .iter()
            .zip(verdicts)
            .filter_map(|(reward, ok)| ok.then(|| reward.clone()))
            .collect();

        // 5. 顺序发放
        self.give_rewards(uid, &eligible).await?;

        info!(
            candidates = candidates.len(),
            awarded = eligible.len(),
            "奖励评估完成"
        );

        Ok(RewardOutcome::Evaluated {
            candidates: candidates.len(),
            awarded: eligible,
        })
    }

    /// 条件是否处于激活状态
    pub async fn is_condition_active(&self, condition: &str) -> Result<bool> {
        self.store
            .is_set_member(RewardKeys::ACTIVE_CONDITIONS, condition)
            .await
    }

    /// 条件关联的奖励 ID
    pub async fn reward_ids_by_condition(&self, condition: &str) -> Result<Vec<String>> {
        self.store
            .get_set_members(&RewardKeys::condition_rewards(condition))
            .await
    }

    /// 批量加载奖励定义，结果与 `ids` 一一对应
    ///
    /// 记录不存在或无法解析时对应位置为 `None`，不视为错误
    pub async fn rewards_by_ids(&self, ids: &[String]) -> Result<Vec<Option<RewardDefinition>>> {
        let keys: Vec<String> = ids.iter().map(|id| RewardKeys::reward(id)).collect();
        let records = self.store.get_objects(&keys).await?;

        Ok(records
            .into_iter()
            .zip(ids)
            .map(|(record, id)| {
                let record = record?;
                RewardDefinition::from_record(record)
                    .inspect_err(|e| warn!(reward_id = %id, error = %e, "奖励定义无法解析，忽略"))
                    .ok()
            })
            .collect())
    }

    /// 用户领取进度快照
    pub async fn user_progress(&self, uid: &str) -> Result<UserRewardProgress> {
        let members = self
            .store
            .get_sorted_set_range_by_score_with_scores(
                &RewardKeys::user_rewards(uid),
                1.0,
                f64::INFINITY,
            )
            .await?;
        Ok(UserRewardProgress::from_members(members))
    }

    /// 剔除空记录以及用户已达领取上限的奖励
    ///
    /// 用户进度只读取一次，过滤基于该快照完成
    pub async fn filter_completed_rewards(
        &self,
        uid: &str,
        rewards: Vec<Option<RewardDefinition>>,
    ) -> Result<Vec<RewardDefinition>> {
        let progress = self.user_progress(uid).await?;
        let present: Vec<RewardDefinition> = rewards.into_iter().flatten().collect();
        let before = present.len();

        let retained: Vec<RewardDefinition> = present
            .into_iter()
            .filter(|reward| progress.allows(reward))
            .collect();

        metrics::record_candidates_filtered(before - retained.len());
        Ok(retained)
    }

    /// 判定单个奖励的条件是否满足
    ///
    /// 只有 Hook 返回 `true` 才算满足。有意不按真值判断：非布尔返回值
    /// （例如无监听器时原样返回的 payload 对象）一律视为不满足。
    pub async fn check_condition(
        &self,
        reward: &RewardDefinition,
        predicate: &Predicate,
    ) -> Result<bool> {
        let left = predicate.call().await?;
        let hook = check_conditional_hook(&reward.conditional);
        let verdict = self
            .hooks
            .fire_filter(&hook, json!({ "left": left, "right": reward.value }))
            .await?;

        match verdict {
            Value::Bool(ok) => Ok(ok),
            other => {
                debug!(hook = %hook, result = %other, "判定 Hook 未返回布尔值");
                Ok(false)
            }
        }
    }

    /// 顺序发放奖励：先通知监听方，再累加领取次数
    pub async fn give_rewards(&self, uid: &str, rewards: &[RewardDefinition]) -> Result<()> {
        if rewards.is_empty() {
            return Ok(());
        }

        let payload_keys: Vec<String> = rewards
            .iter()
            .map(|reward| RewardKeys::reward_payload(&reward.id))
            .collect();
        let payloads = self.store.get_objects(&payload_keys).await?;
        let user_key = RewardKeys::user_rewards(uid);

        for (reward, payload) in rewards.iter().zip(payloads) {
            let data = payload.map(Value::Object).unwrap_or(Value::Null);
            self.hooks
                .fire_action(&award_hook(&reward.rid), json!({ "uid": uid, "reward": data }))
                .await?;
            self.store.sorted_set_incr_by(&user_key, 1.0, &reward.id).await?;

            metrics::record_reward_award(&reward.rid);
            info!(reward_id = %reward.id, rid = %reward.rid, "奖励已发放");
        }

        Ok(())
    }
}
