//! 统一错误处理模块
//!
//! 奖励流水线中所有外部协作方（存储、Hook、调用方谓词）的失败都汇总到这里，
//! 原样向上传播，不做重试或包装。

use thiserror::Error;

/// 奖励系统错误类型
#[derive(Debug, Error)]
pub enum RewardError {
    // ==================== 存储错误 ====================
    #[error("Redis 错误: {0}")]
    Redis(#[from] redis::RedisError),

    // ==================== Hook 错误 ====================
    #[error("Hook 执行失败: {hook} - {message}")]
    Hook { hook: String, message: String },

    // ==================== 调用方错误 ====================
    #[error("条件取值失败: {0}")]
    Predicate(String),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, RewardError>;

impl RewardError {
    /// 构造 Hook 错误
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Redis(_) => "REDIS_ERROR",
            Self::Hook { .. } => "HOOK_ERROR",
            Self::Predicate(_) => "PREDICATE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 流水线本身从不重试，此方法供调用方决定是否重新触发。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Redis(e) => e.is_io_error() || e.is_timeout() || e.is_connection_dropped(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = RewardError::hook("rewards.award:streak", "listener offline");
        assert_eq!(err.code(), "HOOK_ERROR");
        assert_eq!(
            err.to_string(),
            "Hook 执行失败: rewards.award:streak - listener offline"
        );
    }

    #[test]
    fn test_is_retryable() {
        let io_err = RewardError::Redis(redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        )));
        assert!(io_err.is_retryable());

        let predicate_err = RewardError::Predicate("boom".to_string());
        assert!(!predicate_err.is_retryable());
    }
}
