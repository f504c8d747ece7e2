//! 共享库
//!
//! 包含奖励服务共用的配置、错误处理、Redis 连接与可观测性等基础设施代码。

pub mod cache;
pub mod config;
pub mod error;
pub mod observability;
