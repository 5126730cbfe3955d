/// Hook 模块 - 把一条前端记录桥接为一次平台 sink 调用
use crate::error::{FormatError, Result};
use crate::formatter::{Formatter, StdFormatter};
use crate::level::{SourceLevel, TargetSeverity};
use crate::level_map::{LevelMap, default_severity};
use crate::record::Record;
use crate::sink::{Sink, SinkContext};
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Hook trait - 前端为每条匹配订阅级别的记录调用一次 `fire`
pub trait Hook: Send + Sync {
    /// 订阅的前端级别
    fn levels(&self) -> &[SourceLevel];

    /// 处理一条记录
    fn fire(&self, record: &Record) -> Result<()>;
}

/// 分发时用哪张表决定目标严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingPolicy {
    /// 使用实例自己的映射表，未映射的级别回退到默认表
    #[default]
    InstanceMap,
    /// 总是使用默认表，实例映射表只决定订阅哪些级别
    DefaultTable,
}

impl RoutingPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "instance" => Some(RoutingPolicy::InstanceMap),
            "default" => Some(RoutingPolicy::DefaultTable),
            _ => None,
        }
    }
}

/// 分发 hook
///
/// 构造后只读；并发调用 `fire` 是否安全取决于 formatter 与 sink 本身。
pub struct DispatchHook {
    level_map: LevelMap,
    levels: Vec<SourceLevel>,
    routing: RoutingPolicy,
    sink: Arc<dyn Sink>,
    ctx: SinkContext,
    formatter: Box<dyn Formatter>,
}

impl DispatchHook {
    /// 使用默认文本格式化器和实例路由创建 hook
    pub fn new(level_map: Option<LevelMap>, sink: Arc<dyn Sink>, ctx: SinkContext) -> Self {
        Self::with_options(
            level_map,
            sink,
            ctx,
            Box::new(StdFormatter::default()),
            RoutingPolicy::default(),
        )
    }

    /// 指定格式化器与路由策略创建 hook
    pub fn with_options(
        level_map: Option<LevelMap>,
        sink: Arc<dyn Sink>,
        ctx: SinkContext,
        formatter: Box<dyn Formatter>,
        routing: RoutingPolicy,
    ) -> Self {
        let level_map = level_map
            .filter(|m| !m.is_empty())
            .unwrap_or_default();
        let levels = level_map.keys();

        debug!(
            "Dispatch hook created: sink={}, formatter={}, routing={:?}, levels={:?}",
            sink.name(),
            formatter.name(),
            routing,
            levels
        );

        Self {
            level_map,
            levels,
            routing,
            sink,
            ctx,
            formatter,
        }
    }

    pub fn level_map(&self) -> &LevelMap {
        &self.level_map
    }

    pub fn routing(&self) -> RoutingPolicy {
        self.routing
    }

    pub fn context(&self) -> &SinkContext {
        &self.ctx
    }

    /// 按路由策略解析目标严重级别
    pub fn resolve(&self, level: SourceLevel) -> TargetSeverity {
        match self.routing {
            RoutingPolicy::InstanceMap => self.level_map.resolve(level),
            RoutingPolicy::DefaultTable => default_severity(level),
        }
    }
}

impl Hook for DispatchHook {
    fn levels(&self) -> &[SourceLevel] {
        &self.levels
    }

    fn fire(&self, record: &Record) -> Result<()> {
        let severity = self.resolve(record.level);

        // 格式化失败时不写 sink
        let bytes = self.formatter.format(record)?;
        let msg = String::from_utf8(bytes).map_err(|e| FormatError::Encoding {
            reason: e.to_string(),
        })?;
        let msg = msg.trim_end_matches(['\r', '\n']);

        self.sink.write(severity, &self.ctx, msg)?;
        Ok(())
    }
}

impl fmt::Debug for DispatchHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHook")
            .field("levels", &self.levels)
            .field("routing", &self.routing)
            .field("sink", &self.sink.name())
            .field("formatter", &self.formatter.name())
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
