//! 奖励评估命令行工具
//!
//! 连接 Redis，对指定用户执行一次条件评估或查看领取进度。

use clap::Parser;
use reward_engine::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let runner = CommandRunner::init(&cli.log_level).await?;

    match cli.command {
        Commands::Check {
            uid,
            condition,
            value,
        } => {
            runner.run_check(&uid, &condition, &value).await?;
        }
        Commands::Progress { uid } => {
            runner.run_progress(&uid).await?;
        }
    }

    Ok(())
}
