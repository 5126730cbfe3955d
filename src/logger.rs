//! 前端 Logger
//!
//! 一个很薄的级别化前端：构造记录，写到自身的输出，并把记录交给
//! 订阅了该级别的每个 hook。也实现了 [`log::Log`]，可以安装为进程级 logger。

use crate::error::{Error, Result};
use crate::formatter::{Flags, Formatter, StdFormatter};
use crate::hook::Hook;
use crate::level::SourceLevel;
use crate::record::{Fields, Record};
use log::{Metadata, SetLoggerError};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

pub struct Logger {
    prefix: String,
    flags: Flags,
    min_level: SourceLevel,
    default_level: SourceLevel,
    // None 表示前端输出被丢弃，不再渲染
    output: Option<Mutex<Box<dyn Write + Send>>>,
    hooks: Vec<Box<dyn Hook>>,
}

impl Logger {
    /// 创建 logger
    pub fn new(output: Box<dyn Write + Send>, prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            prefix: prefix.into(),
            flags,
            min_level: SourceLevel::Trace,
            default_level: SourceLevel::Info,
            output: Some(Mutex::new(output)),
            hooks: Vec::new(),
        }
    }

    /// 替换前端自身的输出
    pub fn set_output(&mut self, output: Box<dyn Write + Send>) {
        self.output = Some(Mutex::new(output));
    }

    /// 丢弃前端自身的输出；记录只交给 hook
    pub fn discard_output(&mut self) {
        self.output = None;
    }

    pub fn is_output_discarded(&self) -> bool {
        self.output.is_none()
    }

    /// 低于该级别的记录直接丢弃
    pub fn set_min_level(&mut self, level: SourceLevel) {
        self.min_level = level;
    }

    /// `print` 中没有级别前缀的行使用的级别
    pub fn set_default_level(&mut self, level: SourceLevel) {
        self.default_level = level;
    }

    pub fn add_hook(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn min_level(&self) -> SourceLevel {
        self.min_level
    }

    /// 记录一条消息
    pub fn log(&self, level: SourceLevel, message: impl Into<String>) -> Result<()> {
        self.log_with(level, message, Fields::new())
    }

    /// 记录一条带元数据的消息
    pub fn log_with(
        &self,
        level: SourceLevel,
        message: impl Into<String>,
        fields: Fields,
    ) -> Result<()> {
        if level < self.min_level {
            return Ok(());
        }
        let record = Record::new(level, message)
            .with_prefix(self.prefix.clone())
            .with_fields(fields);
        self.dispatch(&record)
    }

    /// 记录一行文本，行首的 `level: ` 前缀决定级别（例如 `alert: disk full`）
    pub fn print(&self, line: &str) -> Result<()> {
        self.print_with(line, Fields::new())
    }

    /// 同 `print`，附带元数据
    pub fn print_with(&self, line: &str, fields: Fields) -> Result<()> {
        let (level, message) = parse_level_prefix(line).unwrap_or((self.default_level, line));
        self.log_with(level, message, fields)
    }

    /// 写前端输出并调用所有订阅了该级别的 hook
    ///
    /// 每个 hook 都会被调用；返回第一个失败。
    pub fn dispatch(&self, record: &Record) -> Result<()> {
        let mut first_err: Option<Error> = None;

        if let Some(output) = &self.output {
            match StdFormatter::new(self.flags).format(record) {
                Ok(bytes) => {
                    let mut out = output.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Err(e) = out.write_all(&bytes) {
                        first_err = Some(Error::Io(e));
                    }
                }
                Err(e) => first_err = Some(Error::Format(e)),
            }
        }

        for hook in self.hooks.iter().filter(|h| h.levels().contains(&record.level)) {
            if let Err(e) = hook.fire(record) {
                first_err.get_or_insert(e);
            }
        }

        first_err.map_or(Ok(()), Err)
    }

    /// 安装为 `log` crate 的全局 logger
    pub fn install(self, max_level: log::LevelFilter) -> std::result::Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// 解析行首的级别前缀
fn parse_level_prefix(line: &str) -> Option<(SourceLevel, &str)> {
    let (head, rest) = line.split_once(':')?;
    let level = SourceLevel::from_name(head)?;
    Some((level, rest.trim_start()))
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        SourceLevel::from(metadata.level()) >= self.min_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut rec = Record::new(record.level().into(), record.args().to_string())
            .with_prefix(self.prefix.clone());
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            rec = rec.with_location(file, line);
        }

        // log facade 没有返回通道，错误写到标准错误
        if let Err(e) = self.dispatch(&rec) {
            let _ = writeln!(io::stderr(), "sevhook: dispatch failed: {e}");
        }
    }

    fn flush(&self) {
        if let Some(output) = &self.output {
            let _ = output.lock().unwrap_or_else(PoisonError::into_inner).flush();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .field("min_level", &self.min_level)
            .field("default_level", &self.default_level)
            .field("output_discarded", &self.output.is_none())
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
