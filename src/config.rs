use crate::constants::{
    FORMATTERS, LOG_LEVELS, ROUTING_POLICIES, SINK_KINDS, SOURCE_LEVELS, names,
};
use crate::error::{ConfigError, Error, Result};
use crate::formatter::Flags;
use crate::hook::RoutingPolicy;
use crate::level::SourceLevel;
use crate::level_map::LevelMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub hook: HookConfig,
    /// 自定义级别映射；为空时使用默认映射表
    #[serde(default)]
    pub level_map: BTreeMap<String, String>,
    #[serde(default)]
    pub sink: SinkConfig,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::Config(ConfigError::NotFound(path.to_path_buf())))?;
        Self::from_str(&content, path.to_path_buf())
    }

    /// 从字符串解析配置
    pub fn from_str(content: &str, path: PathBuf) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path,
                reason: e.to_string(),
            })
        })?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.hook.validate()?;
        self.level_map()?;
        self.sink.validate()?;
        Ok(())
    }

    /// 解析自定义级别映射；未配置时返回 None（使用默认映射表）
    pub fn level_map(&self) -> Result<Option<LevelMap>> {
        if self.level_map.is_empty() {
            return Ok(None);
        }
        LevelMap::from_names(&self.level_map).map(Some)
    }
}

/// 工具自身诊断日志配置
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// 获取日志级别
    pub fn level(&self) -> &str {
        &self.level
    }

    /// 验证日志级别是否有效
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS
            .iter()
            .any(|&l| l.eq_ignore_ascii_case(self.level.as_str()))
        {
            return Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.level.clone(),
                reason: format!("valid values: {}", LOG_LEVELS.join(", ")),
            }));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Hook 与前端配置
#[derive(Debug, Deserialize)]
pub struct HookConfig {
    /// 消息前缀
    #[serde(default)]
    pub prefix: String,
    /// 格式化标志名称
    #[serde(default = "default_flags")]
    pub flags: Vec<String>,
    /// 路由策略：instance / default
    #[serde(default = "default_routing")]
    pub routing: String,
    /// 格式化器：std / json
    #[serde(default = "default_formatter")]
    pub formatter: String,
    /// 前端最低级别
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

fn default_flags() -> Vec<String> {
    vec!["std".to_string()]
}

fn default_routing() -> String {
    "instance".to_string()
}

fn default_formatter() -> String {
    "std".to_string()
}

fn default_min_level() -> String {
    "trace".to_string()
}

impl HookConfig {
    pub fn flags(&self) -> Result<Flags> {
        Flags::from_names(&self.flags)
    }

    pub fn routing(&self) -> Result<RoutingPolicy> {
        RoutingPolicy::from_name(&self.routing).ok_or_else(|| {
            Error::Config(ConfigError::InvalidValue {
                field: "hook.routing".to_string(),
                value: self.routing.clone(),
                reason: format!("valid values: {}", ROUTING_POLICIES.join(", ")),
            })
        })
    }

    pub fn min_level(&self) -> Result<SourceLevel> {
        SourceLevel::from_name(&self.min_level).ok_or_else(|| {
            Error::Config(ConfigError::InvalidLevel {
                level: self.min_level.clone(),
                valid_levels: names(SOURCE_LEVELS),
            })
        })
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        self.flags()?;
        self.routing()?;
        self.min_level()?;

        if !FORMATTERS
            .iter()
            .any(|&f| f.eq_ignore_ascii_case(self.formatter.trim()))
        {
            return Err(Error::Config(ConfigError::InvalidValue {
                field: "hook.formatter".to_string(),
                value: self.formatter.clone(),
                reason: format!("valid values: {}", FORMATTERS.join(", ")),
            }));
        }
        Ok(())
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            flags: default_flags(),
            routing: default_routing(),
            formatter: default_formatter(),
            min_level: default_min_level(),
        }
    }
}

/// 平台 sink 配置
#[derive(Debug, Deserialize)]
pub struct SinkConfig {
    /// sink 类型：console / file / noop
    #[serde(default = "default_sink_kind")]
    pub kind: String,
    /// file sink 的输出路径
    #[serde(default = "default_sink_file")]
    pub file: String,
    /// 写入上下文的请求标识
    #[serde(default = "default_request_id")]
    pub request_id: String,
    /// 写入上下文的附加标签
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

fn default_sink_kind() -> String {
    "console".to_string()
}

fn default_sink_file() -> String {
    "logs/sevhook.log".to_string()
}

fn default_request_id() -> String {
    "local".to_string()
}

impl SinkConfig {
    pub fn kind(&self) -> String {
        self.kind.trim().to_ascii_lowercase()
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        if !SINK_KINDS.contains(&kind.as_str()) {
            return Err(Error::Config(ConfigError::InvalidValue {
                field: "sink.kind".to_string(),
                value: self.kind.clone(),
                reason: format!("valid values: {}", SINK_KINDS.join(", ")),
            }));
        }
        if kind == "file" && self.file.trim().is_empty() {
            return Err(crate::config_error!(InvalidValue {
                field: "sink.file".to_string(),
                value: self.file.clone(),
                reason: "File sink path cannot be empty".to_string(),
            }));
        }
        Ok(())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: default_sink_kind(),
            file: default_sink_file(),
            request_id: default_request_id(),
            labels: BTreeMap::new(),
        }
    }
}
