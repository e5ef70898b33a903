// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    /// 配置加载失败
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// 缺少必需的配置项
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// 应用程序配置设置
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// HTTP 冒烟测试配置
    pub smoke: SmokeSettings,
    /// 托管数据库配置
    pub database: DatabaseSettings,
}

/// HTTP 冒烟测试配置设置
#[derive(Debug, Deserialize)]
pub struct SmokeSettings {
    /// 被测站点的基础URL
    pub base_url: String,
    /// JSON 报告输出路径
    pub report_path: PathBuf,
    /// 单个请求超时时间（秒），未设置时使用客户端默认值
    pub request_timeout_secs: Option<u64>,
}

impl SmokeSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// REST 服务端点，例如 `https://<project>.supabase.co`
    pub url: Option<String>,
    /// service-role 密钥
    pub service_key: Option<String>,
    /// 需要探测可访问性的附加表
    pub probe_tables: Vec<String>,
}

impl DatabaseSettings {
    /// 返回端点与密钥，任一缺失时报错
    pub fn credentials(&self) -> Result<(&str, &str), SettingsError> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(SettingsError::Missing("database.url"))?;
        let key = self
            .service_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(SettingsError::Missing("database.service_key"))?;
        Ok((url, key))
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/<OTKA_ENVIRONMENT>` 和
    /// `OTKA__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(SettingsError)` - 配置加载失败
    pub fn new() -> Result<Self, SettingsError> {
        let env = std::env::var("OTKA_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("OTKA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("database.probe_tables"),
            )
            .build()?
            .try_deserialize()
            .map_err(SettingsError::from)
    }

    /// 从 TOML 文本加载配置，未出现的键使用默认值
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Self::defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(SettingsError::from)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("smoke.base_url", "http://localhost:3001")?
            .set_default("smoke.report_path", "/app/test_reports/backend_results.json")?
            .set_default(
                "database.probe_tables",
                vec!["partner_orders", "partner_order_items", "partner_resources"],
            )
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
