//! Hook 分发模块
//!
//! 奖励流水线通过命名 Hook 与外部解耦：
//! - filter hook `rewards.checkConditional:{conditional}` 决定条件是否满足
//! - action hook `rewards.award:{rid}` 通知监听方执行实际发放
//!
//! ## 模块结构
//!
//! - `dispatcher`: Hook 分发接口与监听器 trait
//! - `registry`: 进程内 Hook 注册表
//! - `conditionals`: 内置比较运算监听器

pub mod conditionals;
pub mod dispatcher;
pub mod registry;

pub use conditionals::{Comparison, NumericConditional, StringConditional};
pub use dispatcher::{ActionListener, FilterListener, HookDispatcher};
pub use registry::HookRegistry;

/// 条件判定 filter hook 名称
pub fn check_conditional_hook(conditional: &str) -> String {
    format!("rewards.checkConditional:{}", conditional)
}

/// 奖励发放 action hook 名称
pub fn award_hook(rid: &str) -> String {
    format!("rewards.award:{}", rid)
}
