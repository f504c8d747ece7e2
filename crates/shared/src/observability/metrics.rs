//! 奖励指标
//!
//! 基于 metrics crate 记录流水线指标。recorder/exporter 由宿主进程安装，
//! 未安装时所有记录都是空操作。

/// 条件评估次数（按结果区分：inactive / no_candidates / evaluated / failed）
pub const REWARD_EVALUATIONS_TOTAL: &str = "reward_evaluations_total";
/// 奖励发放次数（按 rid 区分）
pub const REWARD_AWARDS_TOTAL: &str = "reward_awards_total";
/// 因领取次数用尽被过滤的候选奖励数
pub const REWARD_CANDIDATES_FILTERED_TOTAL: &str = "reward_candidates_filtered_total";

/// 注册指标描述
pub fn describe_metrics() {
    metrics::describe_counter!(
        REWARD_EVALUATIONS_TOTAL,
        "Total number of condition evaluations"
    );
    metrics::describe_counter!(REWARD_AWARDS_TOTAL, "Total number of rewards awarded");
    metrics::describe_counter!(
        REWARD_CANDIDATES_FILTERED_TOTAL,
        "Total number of candidate rewards dropped by the claim cap"
    );
}

/// 记录一次条件评估
#[inline]
pub fn record_reward_evaluation(result: &'static str) {
    metrics::counter!(REWARD_EVALUATIONS_TOTAL, "result" => result).increment(1);
}

/// 记录一次奖励发放
#[inline]
pub fn record_reward_award(rid: &str) {
    metrics::counter!(REWARD_AWARDS_TOTAL, "rid" => rid.to_string()).increment(1);
}

/// 记录被领取上限过滤掉的候选数
#[inline]
pub fn record_candidates_filtered(count: usize) {
    if count > 0 {
        metrics::counter!(REWARD_CANDIDATES_FILTERED_TOTAL).increment(count as u64);
    }
}
