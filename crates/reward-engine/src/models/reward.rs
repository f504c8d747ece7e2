//! 奖励定义与用户领取进度
//!
//! 奖励定义由外部管理端写入存储，字段在 Redis 哈希中均以字符串保存，
//! 因此反序列化时对领取次数做宽松解析；比较阈值保持存储原值。

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 奖励发放时传给监听方的嵌套奖励数据（如 `{"points": "10"}`）
pub type RewardPayload = Map<String, Value>;

/// 奖励定义
///
/// 对应存储中的 `rewards:id:{id}` 记录，本模块只读不写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardDefinition {
    /// 奖励 ID，同时作为用户进度有序集合中的成员名
    #[serde(deserialize_with = "de_string")]
    pub id: String,
    /// 奖励类型 ID，决定发放 Hook 名称 `rewards.award:{rid}`
    #[serde(deserialize_with = "de_string")]
    pub rid: String,
    /// 每个用户最多可领取次数，0 表示不限
    #[serde(deserialize_with = "de_claimable")]
    pub claimable: u32,
    /// 比较运算名，决定判定 Hook 名称 `rewards.checkConditional:{conditional}`
    #[serde(deserialize_with = "de_string")]
    pub conditional: String,
    /// 比较阈值，原样传给判定 Hook，由比较运算自行解析
    pub value: Value,
}

impl RewardDefinition {
    /// 从存储记录解析奖励定义
    pub fn from_record(record: RewardPayload) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(record))
    }

    /// 是否不限领取次数
    pub fn is_unlimited(&self) -> bool {
        self.claimable == 0
    }

    /// 用户在当前已领取 `claimed` 次的情况下是否仍可领取
    pub fn is_claimable_after(&self, claimed: u64) -> bool {
        self.is_unlimited() || claimed < u64::from(self.claimable)
    }
}

/// 有序集合中的成员及分值
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember {
    pub value: String,
    pub score: f64,
}

/// 用户的奖励领取进度快照（奖励 ID -> 已领取次数）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRewardProgress {
    counts: HashMap<String, u64>,
}

impl UserRewardProgress {
    /// 从有序集合成员构建进度快照
    ///
    /// 分值按整数截断，与存储中的累加计数一致
    pub fn from_members(members: Vec<ScoredMember>) -> Self {
        let counts = members
            .into_iter()
            .map(|m| (m.value, m.score.max(0.0) as u64))
            .collect();
        Self { counts }
    }

    /// 某奖励的已领取次数，未记录时为 0
    pub fn claimed(&self, reward_id: &str) -> u64 {
        self.counts.get(reward_id).copied().unwrap_or(0)
    }

    /// 奖励是否仍可领取
    pub fn allows(&self, reward: &RewardDefinition) -> bool {
        reward.is_claimable_after(self.claimed(&reward.id))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 按奖励 ID 排序后的全部进度
    pub fn entries(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(id, count)| (id.clone(), *count))
            .collect();
        entries.sort();
        entries
    }
}

// ==================== 宽松反序列化 ====================

fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn de_claimable<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid claimable: {}", raw)))
}

/// 取字符串开头的十进制整数，忽略其后的内容（如 `"2.0"` -> 2，`"3 次"` -> 3）
///
/// 前导空白与 `+` 号允许出现；负数或没有数字开头时返回 `None`
fn leading_integer(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
