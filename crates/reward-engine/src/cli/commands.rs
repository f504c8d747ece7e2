//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};

/// 奖励评估命令行工具
#[derive(Parser, Debug)]
#[command(name = "reward-cli")]
#[command(version, about = "奖励条件评估工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 对用户执行一次条件评估并发放满足条件的奖励
    ///
    /// 使用内置比较运算（greater, greaterorequalto, lesser, lesserorequalto, string），
    /// 发放通知仅输出日志。
    Check {
        /// 用户 ID
        #[arg(short, long)]
        uid: String,

        /// 条件名称
        #[arg(short, long)]
        condition: String,

        /// 与奖励阈值比较的值（数字字符串按数字处理）
        #[arg(short, long)]
        value: String,
    },

    /// 查看用户各奖励的已领取次数
    Progress {
        /// 用户 ID
        #[arg(short, long)]
        uid: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "reward-cli",
            "check",
            "--uid",
            "42",
            "--condition",
            "daily-login",
            "--value",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Check {
                uid,
                condition,
                value,
            } => {
                assert_eq!(uid, "42");
                assert_eq!(condition, "daily-login");
                assert_eq!(value, "5");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_progress_with_log_level() {
        let cli = Cli::try_parse_from(["reward-cli", "-l", "debug", "progress", "-u", "7"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::Progress { uid } if uid == "7"));
    }

    #[test]
    fn test_check_requires_value() {
        let result = Cli::try_parse_from(["reward-cli", "check", "-u", "1", "-c", "x"]);
        assert!(result.is_err());
    }
}
