use log::info;

use crate::config::Config;
use crate::error::Result;

/// 验证配置文件
pub fn handle_validate(cfg: &Config) -> Result<()> {
    info!("配置验证已在 main 中完成");

    info!("诊断日志级别: {}", cfg.logging.level());
    info!("Hook 前缀: {:?}", cfg.hook.prefix);
    info!("格式化标志: {:?} (bits: {:#x})", cfg.hook.flags, cfg.hook.flags()?.bits());
    info!("路由策略: {:?}", cfg.hook.routing()?);
    info!("格式化器: {}", cfg.hook.formatter);
    info!("前端最低级别: {}", cfg.hook.min_level()?);

    match cfg.level_map()? {
        Some(map) => info!("自定义级别映射: {} 项", map.len()),
        None => info!("级别映射: 默认"),
    }

    info!(
        "Sink: {} (request_id: {}, labels: {})",
        cfg.sink.kind(),
        cfg.sink.request_id,
        cfg.sink.labels.len()
    );
    if cfg.sink.kind() == "file" {
        info!("Sink 文件: {}", cfg.sink.file);
    }

    Ok(())
}
