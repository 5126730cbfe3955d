use crate::adapter::context_from_config;
use crate::config::Config;
use crate::error::Result;
use crate::formatter::StdFormatter;
use crate::hook::{DispatchHook, Hook};
use crate::level::SourceLevel;
use crate::sink::NoopSink;
use std::io::{self, Write};
use std::sync::Arc;

/// 打印有效的级别映射与订阅情况
pub fn handle_levels(cfg: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_levels(cfg, &mut out)?;
    Ok(())
}

/// 渲染级别表：level | subscribed | severity
pub fn write_levels(cfg: &Config, out: &mut impl Write) -> Result<()> {
    let custom = cfg.level_map()?;
    let source = if custom.is_some() { "custom" } else { "default" };
    let hook = DispatchHook::with_options(
        custom,
        Arc::new(NoopSink),
        context_from_config(cfg),
        Box::new(StdFormatter::default()),
        cfg.hook.routing()?,
    );

    writeln!(out, "level map: {source}, routing: {:?}", hook.routing())?;
    writeln!(out, "{:<8} {:<10} {:<9}", "level", "subscribed", "severity")?;

    for level in SourceLevel::ALL {
        writeln!(
            out,
            "{:<8} {:<10} {:<9}",
            level.as_str(),
            if hook.levels().contains(&level) { "yes" } else { "no" },
            hook.resolve(level).as_str()
        )?;
    }
    Ok(())
}
