use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ExporterError, Result};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - metrics: 指标开关、抓取端点地址、采样周期
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：VW，分隔符：__
    /// 示例：VW__METRICS__BIND_ADDRESS=0.0.0.0:9100
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 VW，分隔符 __
            .add_source(
                Environment::with_prefix("VW")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 指标导出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Global toggle. When false every update is a no-op; the registry and
    /// the scrape endpoint still exist.
    #[serde(default)]
    pub enabled: bool,
    /// `host:port` the scrape endpoint binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Period of the background resource sampler
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,
}

impl MetricsConfig {
    /// Period of the resource sampler; zero is rejected
    pub fn sample_interval(&self) -> Result<Duration> {
        if self.sample_interval_secs == 0 {
            return Err(ExporterError::config(
                "metrics.sample_interval_secs must be greater than 0",
            ));
        }
        Ok(Duration::from_secs(self.sample_interval_secs))
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_sample_interval_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: default_bind_address(),
            sample_interval_secs: default_sample_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_metrics_disabled() {
        let config = StaticConfig::default();
        assert!(!config.metrics.enabled);
        assert_eq!(config.metrics.bind_address, "0.0.0.0:8080");
        assert_eq!(config.metrics.sample_interval_secs, 15);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: StaticConfig = toml::from_str(
            r#"
            [metrics]
            enabled = true
            "#,
        )
        .unwrap();

        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.bind_address, "0.0.0.0:8080");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[metrics]"));
        assert!(sample.contains("bind_address"));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.metrics.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn sample_interval_rejects_zero() {
        let mut config = MetricsConfig {
            sample_interval_secs: 0,
            ..MetricsConfig::default()
        };
        assert!(matches!(
            config.sample_interval(),
            Err(ExporterError::Config(_))
        ));

        config.sample_interval_secs = 5;
        assert_eq!(config.sample_interval().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metrics.toml");
        std::fs::write(
            &path,
            "[metrics]\nenabled = true\nbind_address = \"127.0.0.1:9555\"\n",
        )
        .unwrap();

        let config = StaticConfig::load(path.to_str());
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.bind_address, "127.0.0.1:9555");
    }
}
