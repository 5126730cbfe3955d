/// 适配器入口 - 创建已注册分发 hook 的 logger
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::formatter::{Flags, Formatter, StdFormatter};
use crate::hook::{DispatchHook, Hook, RoutingPolicy};
use crate::level::SourceLevel;
use crate::level_map::LevelMap;
use crate::logger::Logger;
use crate::sink::{ConsoleSink, FileSink, NoopSink, Sink, SinkContext};
use log::info;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// 创建平台 logger
///
/// `output` 是前端自身的输出；所有真实输出都经由 hook 到达 sink，
/// 因此该输出被丢弃，前端不再渲染记录。`level_map` 为 `None` 时使用默认映射表。
pub fn new_sink_logger(
    output: Box<dyn Write + Send>,
    prefix: &str,
    flags: Flags,
    level_map: Option<LevelMap>,
    sink: Arc<dyn Sink>,
    ctx: SinkContext,
) -> Logger {
    SinkLoggerBuilder::new(sink, ctx)
        .prefix(prefix)
        .flags(flags)
        .level_map(level_map)
        .build(output)
}

/// 根据配置创建 sink
pub fn sink_from_config(config: &Config) -> Result<Arc<dyn Sink>> {
    let sink: Arc<dyn Sink> = match config.sink.kind().as_str() {
        "console" => Arc::new(ConsoleSink::default()),
        "file" => Arc::new(FileSink::open(&config.sink.file)?),
        "noop" => Arc::new(NoopSink),
        other => {
            return Err(Error::Config(ConfigError::InvalidValue {
                field: "sink.kind".to_string(),
                value: other.to_string(),
                reason: "Unsupported sink".to_string(),
            }));
        }
    };
    info!("Using sink: {}", sink.name());
    Ok(sink)
}

/// 根据配置创建写入上下文
pub fn context_from_config(config: &Config) -> SinkContext {
    config
        .sink
        .labels
        .iter()
        .fold(SinkContext::from_request(&config.sink.request_id), |ctx, (k, v)| {
            ctx.with_label(k, v)
        })
}

/// 根据配置创建格式化器
pub fn formatter_from_config(config: &Config) -> Result<Box<dyn Formatter>> {
    let flags = config.hook.flags()?;
    match config.hook.formatter.trim().to_ascii_lowercase().as_str() {
        "std" => Ok(Box::new(StdFormatter::new(flags))),
        #[cfg(feature = "json")]
        "json" => Ok(Box::new(crate::formatter::JsonFormatter)),
        other => Err(Error::Config(ConfigError::InvalidValue {
            field: "hook.formatter".to_string(),
            value: other.to_string(),
            reason: "Formatter not available in this build".to_string(),
        })),
    }
}

/// 根据配置创建已注册 hook 的 logger（使用给定 sink）
pub fn logger_from_config(config: &Config, sink: Arc<dyn Sink>) -> Result<Logger> {
    let logger = SinkLoggerBuilder::new(sink, context_from_config(config))
        .prefix(&config.hook.prefix)
        .flags(config.hook.flags()?)
        .level_map(config.level_map()?)
        .routing(config.hook.routing()?)
        .formatter(formatter_from_config(config)?)
        .min_level(config.hook.min_level()?)
        .build(Box::new(io::sink()));
    Ok(logger)
}

/// 平台 logger 构建器
pub struct SinkLoggerBuilder {
    sink: Arc<dyn Sink>,
    ctx: SinkContext,
    prefix: String,
    flags: Flags,
    level_map: Option<LevelMap>,
    routing: RoutingPolicy,
    formatter: Option<Box<dyn Formatter>>,
    min_level: SourceLevel,
}

impl SinkLoggerBuilder {
    pub fn new(sink: Arc<dyn Sink>, ctx: SinkContext) -> Self {
        Self {
            sink,
            ctx,
            prefix: String::new(),
            flags: Flags::STD,
            level_map: None,
            routing: RoutingPolicy::default(),
            formatter: None,
            min_level: SourceLevel::Trace,
        }
    }

    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn level_map(mut self, level_map: Option<LevelMap>) -> Self {
        self.level_map = level_map;
        self
    }

    #[must_use]
    pub fn routing(mut self, routing: RoutingPolicy) -> Self {
        self.routing = routing;
        self
    }

    /// 自定义格式化器；未指定时使用带相同 flags 的文本格式化器
    #[must_use]
    pub fn formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: SourceLevel) -> Self {
        self.min_level = level;
        self
    }

    /// 构建 logger，前端输出被丢弃；返回值只反映 hook 的结果
    pub fn build(self, output: Box<dyn Write + Send>) -> Logger {
        let mut logger = Logger::new(output, self.prefix, self.flags);
        logger.discard_output();
        logger.set_min_level(self.min_level);

        let formatter = self
            .formatter
            .unwrap_or_else(|| Box::new(StdFormatter::new(self.flags)));
        let hook = DispatchHook::with_options(
            self.level_map,
            self.sink,
            self.ctx,
            formatter,
            self.routing,
        );

        info!(
            "Sink logger ready: prefix={:?}, request={}, levels={:?}",
            logger.prefix(),
            hook.context(),
            hook.levels()
        );

        logger.add_hook(Box::new(hook));
        logger
    }
}

impl fmt::Debug for SinkLoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkLoggerBuilder")
            .field("sink", &self.sink.name())
            .field("ctx", &self.ctx)
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .field("level_map", &self.level_map)
            .field("routing", &self.routing)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}
