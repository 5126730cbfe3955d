use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration related error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File operation error
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Record formatting error
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Platform sink write error
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration file parse failed
    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Unknown source level name
    #[error("Invalid source level '{level}', valid values: {}", valid_levels.join(", "))]
    InvalidLevel {
        level: String,
        valid_levels: Vec<String>,
    },

    /// Unknown target severity name
    #[error("Invalid target severity '{severity}', valid values: {}", valid_severities.join(", "))]
    InvalidSeverity {
        severity: String,
        valid_severities: Vec<String>,
    },

    /// Unknown formatting flag name
    #[error("Invalid flag '{flag}', valid values: {}", valid_flags.join(", "))]
    InvalidFlag {
        flag: String,
        valid_flags: Vec<String>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value {field} = '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// File already exists
    #[error("File already exists: {path} (use --force to replace)")]
    AlreadyExists { path: PathBuf },

    /// File write failed
    #[error("Failed to write file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Create directory failed
    #[error("Failed to create directory {path}: {reason}")]
    CreateDirectoryFailed { path: PathBuf, reason: String },
}

/// 格式化错误：记录无法渲染，本条记录的分发被中止
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Metadata key cannot be rendered as `key=value`
    #[error("Invalid field key '{key}': keys must be non-empty and contain no whitespace or '='")]
    InvalidFieldKey { key: String },

    /// Message payload cannot be rendered
    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },

    /// Encoder failure (e.g. JSON serialization)
    #[error("Encoding failed: {reason}")]
    Encoding { reason: String },
}

/// 平台 sink 写入错误（原样返回给调用方，不做重试）
#[derive(Debug, Error)]
pub enum SinkError {
    /// Underlying transport failed
    #[error("Sink write failed: {0}")]
    Io(#[from] io::Error),

    /// Sink refused the message
    #[error("Sink rejected message: {reason}")]
    Rejected { reason: String },
}

/// 应用程序 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;

// 辅助宏，用于快速创建配置错误
#[macro_export]
macro_rules! config_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::Config($crate::error::ConfigError::$variant {
            $($field: $value),+
        })
    };
}
