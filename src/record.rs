/// 单条日志事件
use crate::level::SourceLevel;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// 元数据字段（按 key 排序，输出稳定）
pub type Fields = BTreeMap<String, String>;

/// 前端产生的日志记录
///
/// 记录归前端所有，分发时以 `&Record` 借给 hook，调用结束后 hook 不得保留。
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 前端日志级别
    pub level: SourceLevel,
    /// 消息内容
    pub message: String,
    /// 事件时间
    pub time: DateTime<Local>,
    /// logger 的消息前缀
    pub prefix: String,
    /// 源文件（可选）
    pub file: Option<String>,
    /// 源码行号（可选）
    pub line: Option<u32>,
    /// 任意元数据
    pub fields: Fields,
}

impl Record {
    /// 以当前时间创建记录
    pub fn new(level: SourceLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Local::now(),
            prefix: String::new(),
            file: None,
            line: None,
            fields: Fields::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }
}
