//! 奖励领域模型

pub mod reward;

pub use reward::{RewardDefinition, RewardPayload, ScoredMember, UserRewardProgress};
