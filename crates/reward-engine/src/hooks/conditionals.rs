//! 内置比较运算
//!
//! 响应 `rewards.checkConditional:{name}`，payload 形如 `{"left": .., "right": ..}`，
//! 返回 JSON 布尔值。`left` 为调用方取到的值，`right` 为奖励阈值。

use async_trait::async_trait;
use serde_json::Value;

use super::dispatcher::FilterListener;
use crate::error::Result;

/// 数值比较运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    GreaterOrEqual,
    Lesser,
    LesserOrEqual,
}

impl Comparison {
    pub const ALL: [Comparison; 4] = [
        Comparison::Greater,
        Comparison::GreaterOrEqual,
        Comparison::Lesser,
        Comparison::LesserOrEqual,
    ];

    /// 运算在 Hook 名称中的标识
    pub fn name(self) -> &'static str {
        match self {
            Self::Greater => "greater",
            Self::GreaterOrEqual => "greaterorequalto",
            Self::Lesser => "lesser",
            Self::LesserOrEqual => "lesserorequalto",
        }
    }

    pub fn apply(self, left: f64, right: f64) -> bool {
        match self {
            Self::Greater => left > right,
            Self::GreaterOrEqual => left >= right,
            Self::Lesser => left < right,
            Self::LesserOrEqual => left <= right,
        }
    }
}

/// 取 payload 中的操作数
fn operands(payload: &Value) -> (Option<&Value>, Option<&Value>) {
    (payload.get("left"), payload.get("right"))
}

/// 数字或数字字符串转为 f64
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 字符串形式，数字按 JSON 表示输出
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 数值比较监听器
///
/// 任一操作数无法解析为数字时判定为不满足
#[derive(Debug, Clone, Copy)]
pub struct NumericConditional {
    comparison: Comparison,
}

impl NumericConditional {
    pub fn new(comparison: Comparison) -> Self {
        Self { comparison }
    }

    pub fn evaluate(&self, payload: &Value) -> bool {
        match operands(payload) {
            (Some(left), Some(right)) => match (as_number(left), as_number(right)) {
                (Some(l), Some(r)) => self.comparison.apply(l, r),
                _ => false,
            },
            _ => false,
        }
    }
}

#[async_trait]
impl FilterListener for NumericConditional {
    async fn apply(&self, payload: Value) -> Result<Value> {
        Ok(Value::Bool(self.evaluate(&payload)))
    }

    fn description(&self) -> &'static str {
        self.comparison.name()
    }
}

/// 字符串相等比较监听器
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConditional;

impl StringConditional {
    pub const NAME: &'static str = "string";

    pub fn evaluate(&self, payload: &Value) -> bool {
        match operands(payload) {
            (Some(left), Some(right)) => match (as_text(left), as_text(right)) {
                (Some(l), Some(r)) => l == r,
                _ => false,
            },
            _ => false,
        }
    }
}

#[async_trait]
impl FilterListener for StringConditional {
    async fn apply(&self, payload: Value) -> Result<Value> {
        Ok(Value::Bool(self.evaluate(&payload)))
    }

    fn description(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_names() {
        let names: Vec<_> = Comparison::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["greater", "greaterorequalto", "lesser", "lesserorequalto"]
        );
    }

    #[test]
    fn test_numeric_boundaries() {
        let payload = json!({"left": 5, "right": 5});
        assert!(!NumericConditional::new(Comparison::Greater).evaluate(&payload));
        assert!(NumericConditional::new(Comparison::GreaterOrEqual).evaluate(&payload));
        assert!(!NumericConditional::new(Comparison::Lesser).evaluate(&payload));
        assert!(NumericConditional::new(Comparison::LesserOrEqual).evaluate(&payload));
    }

    #[test]
    fn test_numeric_accepts_numeric_strings() {
        let payload = json!({"left": "10", "right": 9.5});
        assert!(NumericConditional::new(Comparison::Greater).evaluate(&payload));
    }

    #[test]
    fn test_numeric_rejects_non_numbers() {
        let greater = NumericConditional::new(Comparison::Greater);
        assert!(!greater.evaluate(&json!({"left": "ten", "right": 1})));
        assert!(!greater.evaluate(&json!({"left": null, "right": 1})));
        assert!(!greater.evaluate(&json!({"right": 1})));
    }

    #[test]
    fn test_string_equality() {
        let cond = StringConditional;
        assert!(cond.evaluate(&json!({"left": "gold", "right": "gold"})));
        assert!(!cond.evaluate(&json!({"left": "gold", "right": "silver"})));
        assert!(cond.evaluate(&json!({"left": 3, "right": "3"})));
        assert!(!cond.evaluate(&json!({"left": {"a": 1}, "right": "x"})));
    }

    #[tokio::test]
    async fn test_listener_returns_bool() {
        let listener = NumericConditional::new(Comparison::Lesser);
        let result = listener.apply(json!({"left": 1, "right": 2})).await.unwrap();
        assert_eq!(result, json!(true));
    }
}
