//! Hook 分发接口
//!
//! filter hook 依次变换 payload 并返回最终值；action hook 只做通知，无返回值。

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Hook 分发器
///
/// 流水线只依赖此 trait，比较语义与发放副作用全部由实现方决定。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HookDispatcher: Send + Sync {
    /// 触发 filter hook，返回经监听器变换后的 payload
    async fn fire_filter(&self, name: &str, payload: Value) -> Result<Value>;

    /// 触发 action hook
    async fn fire_action(&self, name: &str, payload: Value) -> Result<()>;
}

/// filter hook 监听器
#[async_trait]
pub trait FilterListener: Send + Sync {
    async fn apply(&self, payload: Value) -> Result<Value>;

    /// 监听器描述（用于日志）
    fn description(&self) -> &'static str {
        "filter listener"
    }
}

/// action hook 监听器
#[async_trait]
pub trait ActionListener: Send + Sync {
    async fn handle(&self, payload: Value) -> Result<()>;

    fn description(&self) -> &'static str {
        "action listener"
    }
}

/// 闭包形式的 filter 监听器
pub(crate) struct FnFilter<F>(pub F);

#[async_trait]
impl<F> FilterListener for FnFilter<F>
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    async fn apply(&self, payload: Value) -> Result<Value> {
        (self.0)(payload)
    }
}

/// 闭包形式的 action 监听器
pub(crate) struct FnAction<F>(pub F);

#[async_trait]
impl<F> ActionListener for FnAction<F>
where
    F: Fn(Value) -> Result<()> + Send + Sync,
{
    async fn handle(&self, payload: Value) -> Result<()> {
        (self.0)(payload)
    }
}
