use log::{debug, info};

use crate::adapter::{logger_from_config, sink_from_config};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::level::SourceLevel;
use crate::record::Fields;

/// 解析 `key=value` 形式的元数据参数
pub fn parse_fields(args: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            Error::Config(ConfigError::InvalidValue {
                field: "--field".to_string(),
                value: arg.clone(),
                reason: "expected key=value".to_string(),
            })
        })?;
        fields.insert(key.to_string(), value.to_string());
    }
    Ok(fields)
}

/// 通过配置的 hook 与 sink 发送一条记录
pub fn handle_emit(cfg: &Config, level: &str, fields: &[String], message: &str) -> Result<()> {
    let level: SourceLevel = level.parse()?;
    let fields = parse_fields(fields)?;

    let sink = sink_from_config(cfg)?;
    let mut logger = logger_from_config(cfg, sink)?;
    logger.set_default_level(level);
    debug!("Emitting record: {logger:?}");

    logger.print_with(message, fields)?;
    info!("Record dispatched");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let args = vec!["user=bob".to_string(), "query=a=b".to_string()];
        let fields = parse_fields(&args).unwrap();
        assert_eq!(fields.get("user").map(String::as_str), Some("bob"));
        assert_eq!(fields.get("query").map(String::as_str), Some("a=b"));

        assert!(parse_fields(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_emit_to_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out/sink.log");

        let mut cfg = Config::default();
        cfg.hook.flags = Vec::new();
        cfg.sink.kind = "file".to_string();
        cfg.sink.file = file.to_string_lossy().to_string();
        cfg.sink.request_id = "req-42".to_string();

        handle_emit(&cfg, "info", &["user=bob".to_string()], "alert: disk full").unwrap();

        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content, "[CRITICAL] req-42 | [alert] disk full user=bob\n");
    }

    #[test]
    fn test_emit_rejects_unknown_level() {
        let cfg = Config::default();
        assert!(handle_emit(&cfg, "fatal", &[], "x").is_err());
    }
}
