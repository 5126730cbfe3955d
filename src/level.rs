/// 日志级别定义
/// - SourceLevel：前端日志引擎的级别
/// - TargetSeverity：平台 sink 的固定严重级别枚举
use crate::constants::{SOURCE_LEVELS, TARGET_SEVERITIES, names};
use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 前端日志级别，按严重程度递增排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Alert,
}

impl SourceLevel {
    /// 所有前端级别（按严重程度递增）
    pub const ALL: [SourceLevel; 6] = [
        SourceLevel::Trace,
        SourceLevel::Debug,
        SourceLevel::Info,
        SourceLevel::Warning,
        SourceLevel::Error,
        SourceLevel::Alert,
    ];

    /// 小写名称
    pub fn as_str(self) -> &'static str {
        match self {
            SourceLevel::Trace => "trace",
            SourceLevel::Debug => "debug",
            SourceLevel::Info => "info",
            SourceLevel::Warning => "warning",
            SourceLevel::Error => "error",
            SourceLevel::Alert => "alert",
        }
    }

    /// 按名称查找，忽略大小写；`warn` 视为 `warning`
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "warn" => Some(SourceLevel::Warning),
            other => Self::ALL.into_iter().find(|l| l.as_str() == other),
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::Config(ConfigError::InvalidLevel {
                level: s.to_string(),
                valid_levels: names(SOURCE_LEVELS),
            })
        })
    }
}

impl From<log::Level> for SourceLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => SourceLevel::Trace,
            log::Level::Debug => SourceLevel::Debug,
            log::Level::Info => SourceLevel::Info,
            log::Level::Warn => SourceLevel::Warning,
            log::Level::Error => SourceLevel::Error,
        }
    }
}

/// 平台严重级别，按严重程度递增排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSeverity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Critical = 4,
}

impl TargetSeverity {
    /// 所有平台严重级别（按严重程度递增）
    pub const ALL: [TargetSeverity; 5] = [
        TargetSeverity::Debug,
        TargetSeverity::Info,
        TargetSeverity::Warning,
        TargetSeverity::Error,
        TargetSeverity::Critical,
    ];

    /// 小写名称
    pub fn as_str(self) -> &'static str {
        match self {
            TargetSeverity::Debug => "debug",
            TargetSeverity::Info => "info",
            TargetSeverity::Warning => "warning",
            TargetSeverity::Error => "error",
            TargetSeverity::Critical => "critical",
        }
    }

    /// 数值编码（0 = debug ... 4 = critical）
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 从数值编码还原，超出范围返回 None
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// 按名称或数值编码查找，忽略大小写；`warn` 视为 `warning`
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        if let Ok(code) = lower.parse::<u8>() {
            return Self::from_code(code);
        }
        match lower.as_str() {
            "warn" => Some(TargetSeverity::Warning),
            other => Self::ALL.into_iter().find(|s| s.as_str() == other),
        }
    }
}

impl fmt::Display for TargetSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetSeverity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| {
            Error::Config(ConfigError::InvalidSeverity {
                severity: s.to_string(),
                valid_severities: names(TARGET_SEVERITIES),
            })
        })
    }
}
