//! Hook 注册表
//!
//! 按 Hook 名称管理监听器，实现 `HookDispatcher`。
//!
//! ## 名称匹配
//!
//! 注册名精确匹配 Hook 名称；以 `*` 结尾的注册名按前缀匹配，
//! 如 `rewards.award:*` 接收所有奖励类型的发放通知。
//! 同一 Hook 命中多个监听器时按注册顺序执行。
//!
//! ## 使用示例
//!
//! ```ignore
//! use reward_engine::hooks::HookRegistry;
//! use serde_json::json;
//!
//! let mut registry = HookRegistry::with_default_conditionals();
//! registry.on_action_fn("rewards.award:*", |payload| {
//!     println!("award: {}", payload);
//!     Ok(())
//! });
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::check_conditional_hook;
use super::conditionals::{Comparison, NumericConditional, StringConditional};
use super::dispatcher::{ActionListener, FilterListener, FnAction, FnFilter, HookDispatcher};
use crate::error::Result;

/// 监听器注册名
#[derive(Debug, Clone)]
enum HookPattern {
    Exact(String),
    Prefix(String),
}

impl HookPattern {
    fn parse(name: &str) -> Self {
        match name.strip_suffix('*') {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(name.to_string()),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == name,
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

/// 进程内 Hook 注册表
#[derive(Default)]
pub struct HookRegistry {
    filters: Vec<(HookPattern, Arc<dyn FilterListener>)>,
    actions: Vec<(HookPattern, Arc<dyn ActionListener>)>,
}

impl HookRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建包含内置比较运算的注册表
    ///
    /// 注册以下 filter hook：
    /// - `rewards.checkConditional:greater`
    /// - `rewards.checkConditional:greaterorequalto`
    /// - `rewards.checkConditional:lesser`
    /// - `rewards.checkConditional:lesserorequalto`
    /// - `rewards.checkConditional:string`
    pub fn with_default_conditionals() -> Self {
        let mut registry = Self::new();
        for comparison in Comparison::ALL {
            registry.on_filter(
                &check_conditional_hook(comparison.name()),
                Arc::new(NumericConditional::new(comparison)),
            );
        }
        registry.on_filter(
            &check_conditional_hook(StringConditional::NAME),
            Arc::new(StringConditional),
        );
        debug!(filters = registry.filter_count(), "内置比较运算已注册");
        registry
    }

    /// 注册 filter 监听器
    pub fn on_filter(&mut self, name: &str, listener: Arc<dyn FilterListener>) -> &mut Self {
        debug!(hook = name, description = listener.description(), "注册 filter 监听器");
        self.filters.push((HookPattern::parse(name), listener));
        self
    }

    /// 注册 action 监听器
    pub fn on_action(&mut self, name: &str, listener: Arc<dyn ActionListener>) -> &mut Self {
        debug!(hook = name, description = listener.description(), "注册 action 监听器");
        self.actions.push((HookPattern::parse(name), listener));
        self
    }

    /// 以闭包注册 filter 监听器
    pub fn on_filter_fn<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.on_filter(name, Arc::new(FnFilter(f)))
    }

    /// 以闭包注册 action 监听器
    pub fn on_action_fn<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(Value) -> Result<()> + Send + Sync + 'static,
    {
        self.on_action(name, Arc::new(FnAction(f)))
    }

    /// 是否有监听器能响应指定 filter hook
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.iter().any(|(pattern, _)| pattern.matches(name))
    }

    /// 是否有监听器能响应指定 action hook
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|(pattern, _)| pattern.matches(name))
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

#[async_trait]
impl HookDispatcher for HookRegistry {
    /// 依次将 payload 交给匹配的监听器变换；无监听器时原样返回
    async fn fire_filter(&self, name: &str, payload: Value) -> Result<Value> {
        let mut value = payload;
        let mut matched = 0usize;
        for (_, listener) in self.filters.iter().filter(|(p, _)| p.matches(name)) {
            value = listener.apply(value).await?;
            matched += 1;
        }
        if matched == 0 {
            debug!(hook = name, "filter hook 无监听器，返回原始 payload");
        }
        Ok(value)
    }

    /// 按注册顺序通知匹配的监听器，任一失败即返回错误
    async fn fire_action(&self, name: &str, payload: Value) -> Result<()> {
        for (_, listener) in self.actions.iter().filter(|(p, _)| p.matches(name)) {
            listener.handle(payload.clone()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewardError;
    use parking_lot::Mutex;
    use serde_json::json;

    #[test]
    fn test_registry_new() {
        let registry = HookRegistry::new();
        assert_eq!(registry.filter_count(), 0);
        assert_eq!(registry.action_count(), 0);
    }

    #[test]
    fn test_registry_with_default_conditionals() {
        let registry = HookRegistry::with_default_conditionals();
        assert_eq!(registry.filter_count(), 5);
        for name in [
            "greater",
            "greaterorequalto",
            "lesser",
            "lesserorequalto",
            "string",
        ] {
            assert!(registry.has_filter(&check_conditional_hook(name)), "{}", name);
        }
        assert!(!registry.has_filter("rewards.checkConditional:between"));
    }

    #[test]
    fn test_pattern_matching() {
        let mut registry = HookRegistry::new();
        registry.on_action_fn("rewards.award:*", |_| Ok(()));

        assert!(registry.has_action("rewards.award:streak"));
        assert!(registry.has_action("rewards.award:"));
        assert!(!registry.has_action("rewards.other"));
    }

    #[tokio::test]
    async fn test_filter_without_listener_returns_payload() {
        let registry = HookRegistry::new();
        let payload = json!({"left": 1, "right": 2});

        let result = registry
            .fire_filter("rewards.checkConditional:unknown", payload.clone())
            .await
            .unwrap();
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_filter_listeners_chain_in_order() {
        let mut registry = HookRegistry::new();
        registry
            .on_filter_fn("score", |v| Ok(json!(v.as_i64().unwrap_or(0) + 1)))
            .on_filter_fn("score", |v| Ok(json!(v.as_i64().unwrap_or(0) * 10)));

        let result = registry.fire_filter("score", json!(1)).await.unwrap();
        assert_eq!(result, json!(20));
    }

    #[tokio::test]
    async fn test_action_listeners_receive_payload() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();

        let exact = seen.clone();
        registry.on_action_fn("rewards.award:streak", move |payload| {
            exact.lock().push(("exact", payload));
            Ok(())
        });
        let wildcard = seen.clone();
        registry.on_action_fn("rewards.award:*", move |payload| {
            wildcard.lock().push(("wildcard", payload));
            Ok(())
        });

        registry
            .fire_action("rewards.award:streak", json!({"uid": "1"}))
            .await
            .unwrap();
        registry
            .fire_action("rewards.award:points", json!({"uid": "2"}))
            .await
            .unwrap();

        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], ("exact", json!({"uid": "1"})));
        assert_eq!(seen[1], ("wildcard", json!({"uid": "1"})));
        assert_eq!(seen[2], ("wildcard", json!({"uid": "2"})));
    }

    #[tokio::test]
    async fn test_action_listener_error_propagates() {
        let mut registry = HookRegistry::new();
        registry.on_action_fn("rewards.award:streak", |_| {
            Err(RewardError::hook("rewards.award:streak", "points service down"))
        });

        let err = registry
            .fire_action("rewards.award:streak", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "HOOK_ERROR");
    }
}
