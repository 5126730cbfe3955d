//! 公共常量
//! 提供：
//! - 工具自身诊断日志的合法级别 LOG_LEVELS
//! - 前端日志级别 / 平台严重级别 / 格式化标志的合法名称

/// 合法的诊断日志级别（env_logger 使用）
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 前端日志级别名称（按严重程度递增）
pub const SOURCE_LEVELS: &[&str] = &["trace", "debug", "info", "warning", "error", "alert"];

/// 平台严重级别名称（按严重程度递增）
pub const TARGET_SEVERITIES: &[&str] = &["debug", "info", "warning", "error", "critical"];

/// 格式化标志名称
pub const FLAG_NAMES: &[&str] = &[
    "date",
    "time",
    "microseconds",
    "longfile",
    "shortfile",
    "utc",
    "msgprefix",
    "std",
];

/// 合法的 sink 类型
pub const SINK_KINDS: &[&str] = &["console", "file", "noop"];

/// 合法的格式化器名称
pub const FORMATTERS: &[&str] = &["std", "json"];

/// 合法的路由策略名称
pub const ROUTING_POLICIES: &[&str] = &["instance", "default"];

/// 把静态名称表转换为错误信息中使用的 Vec<String>
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
