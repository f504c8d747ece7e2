//! 存储键生成器

/// 奖励相关的存储键
pub struct RewardKeys;

impl RewardKeys {
    /// 全局激活条件集合
    pub const ACTIVE_CONDITIONS: &'static str = "conditions:active";

    /// 条件关联的奖励 ID 集合
    pub fn condition_rewards(condition: &str) -> String {
        format!("condition:{}:rewards", condition)
    }

    /// 奖励定义记录
    pub fn reward(reward_id: &str) -> String {
        format!("rewards:id:{}", reward_id)
    }

    /// 奖励发放时传给监听方的嵌套数据
    pub fn reward_payload(reward_id: &str) -> String {
        format!("rewards:id:{}:rewards", reward_id)
    }

    /// 用户领取进度有序集合（成员为奖励 ID，分值为领取次数）
    pub fn user_rewards(uid: &str) -> String {
        format!("uid:{}:rewards", uid)
    }
}
