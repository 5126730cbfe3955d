use crate::config::LoggingConfig;
use crate::constants::LOG_LEVELS;
use crate::error::{ConfigError, Error, Result};
use log::LevelFilter;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// 使用 once_cell 缓存日志级别映射表，避免每次查找时重新构建
static LOG_LEVEL_MAP: Lazy<HashMap<&'static str, LevelFilter>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("trace", LevelFilter::Trace);
    map.insert("debug", LevelFilter::Debug);
    map.insert("info", LevelFilter::Info);
    map.insert("warn", LevelFilter::Warn);
    map.insert("error", LevelFilter::Error);
    map
});

/// 初始化工具自身的诊断日志（输出到 stderr）
///
/// 诊断日志只在构造与配置阶段使用，不会进入 hook 的分发路径。
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    init_with_level(level);
    log::debug!("Diagnostic logging initialized - level: {level:?}");
    Ok(())
}

/// 按 -v / -q 选择级别初始化
pub fn init_simple_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    init_with_level(level);
}

fn init_with_level(level: LevelFilter) {
    // 重复初始化（例如测试中）时忽略错误
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .try_init();
}

/// 解析日志级别字符串
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    let lower = level_str.to_lowercase();
    LOG_LEVEL_MAP.get(lower.as_str()).copied().ok_or_else(|| {
        Error::Config(ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            value: level_str.to_string(),
            reason: format!("valid values: {}", LOG_LEVELS.join(", ")),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("trace").unwrap(), LevelFilter::Trace);
        assert!(parse_log_level("verbose").is_err());
    }
}
