/// 平台 Sink 模块 - 按严重级别持久化格式化后的消息
///
/// 内置实现:
/// - ConsoleSink: 标准错误 / 标准输出
/// - FileSink: 追加写入文件
/// - MemorySink: 记录每次调用（测试与嵌入方使用）
/// - NoopSink: 丢弃所有消息
use crate::error::SinkError;
use crate::level::TargetSeverity;
use log::info;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Sink 写入结果
pub type SinkResult = std::result::Result<(), SinkError>;

/// Sink 写入上下文
///
/// 每个 logger 实例在创建时从入站请求/会话获取一次，之后只读。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkContext {
    request_id: String,
    labels: BTreeMap<String, String>,
}

impl SinkContext {
    /// 从入站请求标识创建上下文
    pub fn from_request(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            labels: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }
}

impl fmt::Display for SinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.request_id.is_empty() {
            f.write_str("-")?;
        } else {
            f.write_str(&self.request_id)?;
        }
        for (k, v) in &self.labels {
            write!(f, " {k}={v}")?;
        }
        Ok(())
    }
}

/// Sink trait - 平台日志后端的五个按严重级别写入操作
pub trait Sink: Send + Sync {
    fn debug(&self, ctx: &SinkContext, msg: &str) -> SinkResult;

    fn info(&self, ctx: &SinkContext, msg: &str) -> SinkResult;

    fn warning(&self, ctx: &SinkContext, msg: &str) -> SinkResult;

    fn error(&self, ctx: &SinkContext, msg: &str) -> SinkResult;

    fn critical(&self, ctx: &SinkContext, msg: &str) -> SinkResult;

    /// 按严重级别调用且只调用一个写入操作
    fn write(&self, severity: TargetSeverity, ctx: &SinkContext, msg: &str) -> SinkResult {
        match severity {
            TargetSeverity::Debug => self.debug(ctx, msg),
            TargetSeverity::Info => self.info(ctx, msg),
            TargetSeverity::Warning => self.warning(ctx, msg),
            TargetSeverity::Error => self.error(ctx, msg),
            TargetSeverity::Critical => self.critical(ctx, msg),
        }
    }

    /// 获取 sink 名称 (用于日志记录)
    fn name(&self) -> &str;
}

/// 渲染一行 sink 输出
fn render_line(severity: TargetSeverity, ctx: &SinkContext, msg: &str) -> String {
    format!(
        "[{}] {} | {}\n",
        severity.as_str().to_ascii_uppercase(),
        ctx,
        msg
    )
}

/// 实现五个写入操作，全部委托给 `write_line`
macro_rules! delegate_severities {
    () => {
        fn debug(&self, ctx: &SinkContext, msg: &str) -> SinkResult {
            self.write_line(TargetSeverity::Debug, ctx, msg)
        }

        fn info(&self, ctx: &SinkContext, msg: &str) -> SinkResult {
            self.write_line(TargetSeverity::Info, ctx, msg)
        }

        fn warning(&self, ctx: &SinkContext, msg: &str) -> SinkResult {
            self.write_line(TargetSeverity::Warning, ctx, msg)
        }

        fn error(&self, ctx: &SinkContext, msg: &str) -> SinkResult {
            self.write_line(TargetSeverity::Error, ctx, msg)
        }

        fn critical(&self, ctx: &SinkContext, msg: &str) -> SinkResult {
            self.write_line(TargetSeverity::Critical, ctx, msg)
        }
    };
}

/// 控制台输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    Stdout,
    #[default]
    Stderr,
}

/// 控制台 sink
#[derive(Debug, Default)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    fn write_line(&self, severity: TargetSeverity, ctx: &SinkContext, msg: &str) -> SinkResult {
        let line = render_line(severity, ctx, msg);
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().write_all(line.as_bytes())?,
            ConsoleStream::Stderr => io::stderr().lock().write_all(line.as_bytes())?,
        }
        Ok(())
    }
}

impl Sink for ConsoleSink {
    delegate_severities!();

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "console(stdout)",
            ConsoleStream::Stderr => "console(stderr)",
        }
    }
}

/// 文件 sink - 追加写入，每次调用立即落盘，不做缓冲
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// 打开（或创建）文件，必要时创建父目录
    pub fn open(path: impl AsRef<Path>) -> std::result::Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!("File sink opened: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, severity: TargetSeverity, ctx: &SinkContext, msg: &str) -> SinkResult {
        let line = render_line(severity, ctx, msg);
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Sink for FileSink {
    delegate_severities!();

    fn name(&self) -> &str {
        "file"
    }
}

/// MemorySink 记录的一次写入调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCall {
    pub severity: TargetSeverity,
    pub request_id: String,
    pub message: String,
}

/// 内存 sink - 记录每次写入调用
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Mutex<Vec<SinkCall>>,
    reject: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次写入都返回 `SinkError::Rejected` 的 sink（调用仍会被记录）
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject: Some(reason.into()),
        }
    }

    /// 所有调用的快照
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 某个严重级别的调用次数
    pub fn count(&self, severity: TargetSeverity) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn write_line(&self, severity: TargetSeverity, ctx: &SinkContext, msg: &str) -> SinkResult {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkCall {
                severity,
                request_id: ctx.request_id().to_string(),
                message: msg.to_string(),
            });

        match &self.reject {
            Some(reason) => Err(SinkError::Rejected {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Sink for MemorySink {
    delegate_severities!();

    fn name(&self) -> &str {
        "memory"
    }
}

/// 丢弃所有消息的 sink
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn debug(&self, _ctx: &SinkContext, _msg: &str) -> SinkResult {
        Ok(())
    }

    fn info(&self, _ctx: &SinkContext, _msg: &str) -> SinkResult {
        Ok(())
    }

    fn warning(&self, _ctx: &SinkContext, _msg: &str) -> SinkResult {
        Ok(())
    }

    fn error(&self, _ctx: &SinkContext, _msg: &str) -> SinkResult {
        Ok(())
    }

    fn critical(&self, _ctx: &SinkContext, _msg: &str) -> SinkResult {
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = SinkContext::from_request("req-7").with_label("zone", "eu");
        assert_eq!(ctx.to_string(), "req-7 zone=eu");
        assert_eq!(SinkContext::default().to_string(), "-");
    }

    #[test]
    fn test_write_dispatches_to_exactly_one_path() {
        let sink = MemorySink::new();
        let ctx = SinkContext::from_request("r");
        for sev in TargetSeverity::ALL {
            sink.write(sev, &ctx, sev.as_str()).unwrap();
        }
        for sev in TargetSeverity::ALL {
            assert_eq!(sink.count(sev), 1);
        }
        let calls = sink.calls();
        assert_eq!(calls[4].severity, TargetSeverity::Critical);
        assert_eq!(calls[4].message, "critical");
        assert_eq!(calls[4].request_id, "r");
    }

    #[test]
    fn test_rejecting_sink_records_and_fails() {
        let sink = MemorySink::rejecting("quota exceeded");
        let err = sink
            .error(&SinkContext::default(), "boom")
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_render_line() {
        let ctx = SinkContext::from_request("abc");
        assert_eq!(
            render_line(TargetSeverity::Warning, &ctx, "disk low"),
            "[WARNING] abc | disk low\n"
        );
    }
}
