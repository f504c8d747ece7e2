//! 奖励存储层
//!
//! - `traits`: 存储协作方接口，流水线只依赖此抽象
//! - `keys`: 存储键布局
//! - `redis_store`: 基于 Redis 的实现
//! - `memory_store`: 进程内实现，用于测试与本地调试

pub mod keys;
pub mod memory_store;
pub mod redis_store;
pub mod traits;

pub use keys::RewardKeys;
pub use memory_store::InMemoryRewardStore;
pub use redis_store::RedisRewardStore;
pub use traits::RewardStore;
