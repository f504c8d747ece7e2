//! 条件取值谓词
//!
//! 调用方提供一个无参函数，返回与奖励阈值比较的左值。函数可以是同步的，
//! 也可以返回 future；两种形式统一适配为异步调用。

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;

type SyncFn = dyn Fn() -> Result<Value> + Send + Sync;
type AsyncFn = dyn Fn() -> BoxFuture<'static, Result<Value>> + Send + Sync;

/// 条件取值谓词
///
/// 每个候选奖励都会独立调用一次
pub enum Predicate {
    Sync(Box<SyncFn>),
    Async(Box<AsyncFn>),
}

impl Predicate {
    /// 同步取值
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self::Sync(Box::new(f))
    }

    /// 异步取值
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self::Async(Box::new(move || f().boxed()))
    }

    /// 固定值
    pub fn value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::from_fn(move || Ok(value.clone()))
    }

    /// 调用谓词，同步形式包装为已就绪的 future
    pub fn call(&self) -> BoxFuture<'static, Result<Value>> {
        match self {
            Self::Sync(f) => futures::future::ready(f()).boxed(),
            Self::Async(f) => f(),
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Predicate::Sync"),
            Self::Async(_) => f.write_str("Predicate::Async"),
        }
    }
}
