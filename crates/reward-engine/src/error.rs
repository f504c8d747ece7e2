//! 奖励引擎错误类型
//!
//! 沿用共享库的统一错误，流水线中所有错误原样向上传播。

pub use reward_shared::error::{Result, RewardError};
