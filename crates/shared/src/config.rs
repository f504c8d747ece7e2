//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub redis: RedisConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "reward-engine".to_string(),
            environment: "development".to_string(),
            redis: RedisConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（REWARD_ 前缀，层级用双下划线，如 REWARD_REDIS__URL -> redis.url）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("REWARD_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("REWARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        // 可观测性配置未显式设置服务名时沿用应用服务名
        if config.observability.service_name.is_empty() {
            config.observability.service_name = config.service_name.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_load_from_config_dir() {
        let dir = std::env::temp_dir().join(format!("reward-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            r#"
environment = "production"

[redis]
url = "redis://cache:6380"

[observability]
log_level = "debug"
"#,
        )
        .unwrap();

        // SAFETY: 仅在此测试中设置 CONFIG_DIR，其它测试不读取该变量
        unsafe {
            std::env::set_var("CONFIG_DIR", &dir);
        }
        let config = AppConfig::load("reward-engine").unwrap();
        unsafe {
            std::env::remove_var("CONFIG_DIR");
        }
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(config.service_name, "reward-engine");
        assert_eq!(config.environment, "production");
        assert_eq!(config.redis.url, "redis://cache:6380");
        // 未配置的字段保持默认值
        assert!(!config.observability.json_logs);
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.service_name, "reward-engine");
    }
}
