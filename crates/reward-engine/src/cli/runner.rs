//! 命令执行器
//!
//! 负责加载配置、初始化可观测性与 Redis 连接，并执行各子命令。

use std::sync::Arc;

use anyhow::{Context, Result};
use reward_shared::{cache::Cache, config::AppConfig, observability};
use tracing::{info, warn};

use crate::hooks::HookRegistry;
use crate::repository::RedisRewardStore;
use crate::service::{Predicate, RewardEngine, RewardOutcome};

const SERVICE_NAME: &str = "reward-engine";

/// 命令执行器
pub struct CommandRunner {
    engine: RewardEngine,
}

impl CommandRunner {
    /// 加载配置并建立依赖
    pub async fn init(log_level: &str) -> Result<Self> {
        let config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });

        let obs_config = config.observability.clone().with_log_level(log_level);
        observability::init(&obs_config)?;

        info!(environment = %config.environment, "Configuration loaded");

        let cache = Cache::new(&config.redis).context("invalid Redis URL")?;
        cache
            .health_check()
            .await
            .with_context(|| format!("Redis unreachable at {}", config.redis.url))?;
        info!("Redis connection established");

        Ok(Self {
            engine: Self::build_engine(cache),
        })
    }

    /// 组装引擎：内置比较运算 + 记录日志的发放监听器
    fn build_engine(cache: Cache) -> RewardEngine {
        let mut registry = HookRegistry::with_default_conditionals();
        registry.on_action_fn("rewards.award:*", |payload| {
            info!(payload = %payload, "奖励发放通知");
            Ok(())
        });

        RewardEngine::new(
            Arc::new(RedisRewardStore::new(cache)),
            Arc::new(registry),
        )
    }

    /// 执行一次条件评估
    pub async fn run_check(&self, uid: &str, condition: &str, value: &str) -> Result<()> {
        // 命令行取值按字符串传入，数值比较运算会自行解析
        let outcome = self
            .engine
            .evaluate(uid, condition, Predicate::value(value))
            .await?;

        match outcome {
            RewardOutcome::ConditionInactive => {
                warn!(condition, "条件未激活");
                println!("condition '{}' is not active", condition);
            }
            RewardOutcome::NoCandidates => {
                println!("no claimable rewards for user {}", uid);
            }
            RewardOutcome::Evaluated {
                candidates,
                awarded,
            } => {
                println!(
                    "evaluated {} candidate(s), awarded {}",
                    candidates,
                    awarded.len()
                );
                for reward in awarded {
                    println!("  {} (rid={})", reward.id, reward.rid);
                }
            }
        }

        Ok(())
    }

    /// 输出用户领取进度
    pub async fn run_progress(&self, uid: &str) -> Result<()> {
        let progress = self.engine.user_progress(uid).await?;
        if progress.is_empty() {
            println!("user {} has not claimed any reward", uid);
            return Ok(());
        }
        for (reward_id, count) in progress.entries() {
            println!("{}\t{}", reward_id, count);
        }
        Ok(())
    }
}
