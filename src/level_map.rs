/// 级别映射表：SourceLevel -> TargetSeverity
///
/// 构造后不可变。未映射的级别在解析时回退到默认映射表中的对应项，
/// 既不报错也不丢弃记录。
use crate::error::{ConfigError, Error, Result};
use crate::level::{SourceLevel, TargetSeverity};
use std::collections::BTreeMap;

/// 默认映射表中某个级别对应的严重级别
pub fn default_severity(level: SourceLevel) -> TargetSeverity {
    match level {
        SourceLevel::Trace | SourceLevel::Debug => TargetSeverity::Debug,
        SourceLevel::Info => TargetSeverity::Info,
        SourceLevel::Warning => TargetSeverity::Warning,
        SourceLevel::Error => TargetSeverity::Error,
        SourceLevel::Alert => TargetSeverity::Critical,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap {
    entries: BTreeMap<SourceLevel, TargetSeverity>,
}

impl LevelMap {
    /// 创建映射表；未提供或为空时使用默认映射表
    pub fn new(custom: Option<BTreeMap<SourceLevel, TargetSeverity>>) -> Self {
        match custom {
            Some(entries) if !entries.is_empty() => Self { entries },
            _ => Self::default_map(),
        }
    }

    /// 默认映射表
    pub fn default_map() -> Self {
        SourceLevel::ALL
            .into_iter()
            .map(|level| (level, default_severity(level)))
            .collect()
    }

    /// 从配置中的名称表解析（例如 `info = "critical"`）
    ///
    /// 别名指向同一级别（例如 `warn` 与 `warning`）时报错。
    pub fn from_names(names: &BTreeMap<String, String>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut seen: BTreeMap<SourceLevel, &str> = BTreeMap::new();
        for (name, severity) in names {
            let level = name.parse::<SourceLevel>()?;
            if let Some(previous) = seen.insert(level, name) {
                return Err(Error::Config(ConfigError::InvalidValue {
                    field: format!("level_map.{name}"),
                    value: severity.clone(),
                    reason: format!("'{previous}' and '{name}' both name level {level}"),
                }));
            }
            entries.insert(level, severity.parse::<TargetSeverity>()?);
        }
        Ok(Self::new(Some(entries)))
    }

    /// 追加或覆盖一项，返回新的映射表
    #[must_use]
    pub fn with(mut self, level: SourceLevel, severity: TargetSeverity) -> Self {
        self.entries.insert(level, severity);
        self
    }

    /// 映射表中的所有源级别，用于构造 hook 的订阅列表
    pub fn keys(&self) -> Vec<SourceLevel> {
        self.entries.keys().copied().collect()
    }

    /// 精确查找，不回退
    pub fn get(&self, level: SourceLevel) -> Option<TargetSeverity> {
        self.entries.get(&level).copied()
    }

    /// 解析严重级别：精确项优先，否则回退到默认映射表
    pub fn resolve(&self, level: SourceLevel) -> TargetSeverity {
        self.get(level).unwrap_or_else(|| default_severity(level))
    }

    pub fn contains(&self, level: SourceLevel) -> bool {
        self.entries.contains_key(&level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceLevel, TargetSeverity)> + '_ {
        self.entries.iter().map(|(l, s)| (*l, *s))
    }
}

impl Default for LevelMap {
    fn default() -> Self {
        Self::default_map()
    }
}

impl FromIterator<(SourceLevel, TargetSeverity)> for LevelMap {
    fn from_iter<I: IntoIterator<Item = (SourceLevel, TargetSeverity)>>(iter: I) -> Self {
        Self::new(Some(iter.into_iter().collect()))
    }
}
