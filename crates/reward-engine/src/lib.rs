//! 奖励评估引擎
//!
//! 用户完成触发动作后，检查对应条件是否激活，筛选用户尚可领取的奖励，
//! 通过可插拔的 Hook 判定条件并发放奖励。
//!
//! ## 模块结构
//!
//! - `models`: 奖励定义与用户领取进度
//! - `error`: 错误类型定义
//! - `repository`: 存储接口与 Redis / 内存实现
//! - `hooks`: Hook 分发接口、注册表与内置比较运算
//! - `service`: 奖励评估引擎
//! - `cli`: 命令行入口

pub mod cli;
pub mod error;
pub mod hooks;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{Result, RewardError};
pub use hooks::{HookDispatcher, HookRegistry};
pub use models::{RewardDefinition, RewardPayload, ScoredMember, UserRewardProgress};
pub use repository::{InMemoryRewardStore, RedisRewardStore, RewardKeys, RewardStore};
pub use service::{Predicate, RewardEngine, RewardOutcome};
