//! 奖励业务服务层

pub mod predicate;
pub mod reward_engine;

pub use predicate::Predicate;
pub use reward_engine::{RewardEngine, RewardOutcome};
