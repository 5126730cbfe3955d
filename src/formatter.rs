//! 记录格式化
//!
//! `Formatter` 把一条 [`Record`] 渲染为字节。格式化失败时返回 [`FormatError`]，
//! hook 会中止本条记录的分发，不会向 sink 写入任何内容。

use crate::constants::{FLAG_NAMES, names};
use crate::error::{ConfigError, Error, FormatError, Result};
use crate::record::Record;
use chrono::Utc;
use std::fmt::Write as _;
use std::ops::{BitOr, BitOrAssign};

/// 格式化标志位集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// 本地日期 2009/01/23
    pub const DATE: Flags = Flags(1);
    /// 本地时间 01:23:23
    pub const TIME: Flags = Flags(1 << 1);
    /// 微秒精度 01:23:23.123123，需配合 TIME
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// 完整文件路径与行号
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// 仅文件名与行号，优先于 LONG_FILE
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// 使用 UTC 而不是本地时区
    pub const UTC: Flags = Flags(1 << 5);
    /// 前缀放在消息前而不是行首
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> Self {
        Flags(bits)
    }

    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// 按名称解析单个标志
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" => Some(Self::DATE),
            "time" => Some(Self::TIME),
            "microseconds" => Some(Self::MICROSECONDS),
            "longfile" => Some(Self::LONG_FILE),
            "shortfile" => Some(Self::SHORT_FILE),
            "utc" => Some(Self::UTC),
            "msgprefix" => Some(Self::MSG_PREFIX),
            "std" => Some(Self::STD),
            _ => None,
        }
    }

    /// 从配置中的名称列表解析
    pub fn from_names<S: AsRef<str>>(list: &[S]) -> Result<Self> {
        list.iter().try_fold(Flags::NONE, |acc, name| {
            let name = name.as_ref();
            Self::from_name(name).map(|f| acc | f).ok_or_else(|| {
                Error::Config(ConfigError::InvalidFlag {
                    flag: name.to_string(),
                    valid_flags: names(FLAG_NAMES),
                })
            })
        })
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

/// 格式化器 trait - hook 通过它把记录渲染为消息
pub trait Formatter: Send + Sync {
    /// 渲染一条记录
    fn format(&self, record: &Record) -> std::result::Result<Vec<u8>, FormatError>;

    /// 格式化器名称 (用于日志记录)
    fn name(&self) -> &str;
}

/// 检查元数据 key 是否可以渲染为 `key=value`
fn validate_field_key(key: &str) -> std::result::Result<(), FormatError> {
    if key.is_empty() || key.contains('=') || key.chars().any(char::is_whitespace) {
        return Err(FormatError::InvalidFieldKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// 值包含空白、引号或 `=` 时加引号
#[inline]
fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.contains(['"', '=']) || value.chars().any(char::is_whitespace)
}

/// 文本格式化器
///
/// 输出形如 `prefix 2009/01/23 01:23:23 main.rs:12: [info] message key=value`。
#[derive(Debug, Clone, Default)]
pub struct StdFormatter {
    flags: Flags,
}

impl StdFormatter {
    pub fn new(flags: Flags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    fn write_header(&self, buf: &mut String, record: &Record) {
        let flags = self.flags;
        if !flags.contains(Flags::MSG_PREFIX) {
            buf.push_str(&record.prefix);
        }

        if flags.contains(Flags::DATE) || flags.contains(Flags::TIME) {
            let naive = if flags.contains(Flags::UTC) {
                record.time.with_timezone(&Utc).naive_local()
            } else {
                record.time.naive_local()
            };
            if flags.contains(Flags::DATE) {
                let _ = write!(buf, "{} ", naive.format("%Y/%m/%d"));
            }
            if flags.contains(Flags::TIME) {
                let _ = write!(buf, "{}", naive.format("%H:%M:%S"));
                if flags.contains(Flags::MICROSECONDS) {
                    let _ = write!(buf, "{}", naive.format("%.6f"));
                }
                buf.push(' ');
            }
        }

        if flags.contains(Flags::SHORT_FILE) || flags.contains(Flags::LONG_FILE) {
            let file = record.file.as_deref().unwrap_or("???");
            let file = if flags.contains(Flags::SHORT_FILE) {
                file.rsplit(['/', '\\']).next().unwrap_or(file)
            } else {
                file
            };
            let _ = write!(buf, "{}:{}: ", file, record.line.unwrap_or(0));
        }

        if flags.contains(Flags::MSG_PREFIX) {
            buf.push_str(&record.prefix);
        }
    }
}

impl Formatter for StdFormatter {
    fn format(&self, record: &Record) -> std::result::Result<Vec<u8>, FormatError> {
        if record.message.contains('\0') {
            return Err(FormatError::InvalidMessage {
                reason: "message contains NUL byte".to_string(),
            });
        }

        let mut buf = String::with_capacity(64 + record.message.len());
        self.write_header(&mut buf, record);
        let _ = write!(buf, "[{}] {}", record.level, record.message);

        for (key, value) in &record.fields {
            validate_field_key(key)?;
            if needs_quoting(value) {
                let _ = write!(buf, " {key}={value:?}");
            } else {
                let _ = write!(buf, " {key}={value}");
            }
        }

        buf.push('\n');
        Ok(buf.into_bytes())
    }

    fn name(&self) -> &str {
        "std"
    }
}

/// JSON 格式化器：每条记录一个 JSON 对象
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

#[cfg(feature = "json")]
impl Formatter for JsonFormatter {
    fn format(&self, record: &Record) -> std::result::Result<Vec<u8>, FormatError> {
        for key in record.fields.keys() {
            validate_field_key(key)?;
        }

        let value = serde_json::json!({
            "time": record.time.to_rfc3339(),
            "level": record.level,
            "prefix": record.prefix,
            "message": record.message,
            "file": record.file,
            "line": record.line,
            "fields": record.fields,
        });

        let mut bytes = serde_json::to_vec(&value).map_err(|e| FormatError::Encoding {
            reason: e.to_string(),
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::SourceLevel;
    use chrono::{Local, TimeZone};

    fn fixed_record() -> Record {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 8, 5, 7).unwrap();
        Record::new(SourceLevel::Info, "hello").with_time(time)
    }

    #[test]
    fn test_flags_bit_ops() {
        let flags = Flags::DATE | Flags::SHORT_FILE;
        assert!(flags.contains(Flags::DATE));
        assert!(!flags.contains(Flags::TIME));
        assert!(Flags::STD.contains(Flags::DATE | Flags::TIME));
        assert_eq!(Flags::from_bits(flags.bits()), flags);
    }

    #[test]
    fn test_flags_from_names() {
        let flags = Flags::from_names(&["date", "SHORTFILE"]).unwrap();
        assert_eq!(flags, Flags::DATE | Flags::SHORT_FILE);

        let err = Flags::from_names(&["date", "bogus"]).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_std_formatter_plain() {
        let out = StdFormatter::new(Flags::NONE).format(&fixed_record()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[info] hello\n");
    }

    #[test]
    fn test_std_formatter_date_time() {
        let out = StdFormatter::new(Flags::STD).format(&fixed_record()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2024/03/09 08:05:07 [info] hello\n");
    }

    #[test]
    fn test_std_formatter_microseconds() {
        let out = StdFormatter::new(Flags::TIME | Flags::MICROSECONDS)
            .format(&fixed_record())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "08:05:07.000000 [info] hello\n");
    }

    #[test]
    fn test_std_formatter_prefix_and_file() {
        let record = fixed_record()
            .with_prefix("app: ")
            .with_location("src/net/conn.rs", 42);

        let out = StdFormatter::new(Flags::SHORT_FILE).format(&record).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "app: conn.rs:42: [info] hello\n");

        let out = StdFormatter::new(Flags::LONG_FILE | Flags::MSG_PREFIX)
            .format(&record)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "src/net/conn.rs:42: app: [info] hello\n"
        );
    }

    #[test]
    fn test_std_formatter_unknown_location() {
        let out = StdFormatter::new(Flags::SHORT_FILE)
            .format(&fixed_record())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "???:0: [info] hello\n");
    }

    #[test]
    fn test_std_formatter_fields() {
        let record = fixed_record()
            .with_field("user", "bob")
            .with_field("path", "/a b");
        let out = StdFormatter::default().format(&record).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[info] hello path=\"/a b\" user=bob\n"
        );
    }

    #[test]
    fn test_std_formatter_rejects_bad_key() {
        let record = fixed_record().with_field("bad key", "x");
        let err = StdFormatter::default().format(&record).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidFieldKey {
                key: "bad key".to_string()
            }
        );
    }

    #[test]
    fn test_std_formatter_rejects_nul() {
        let record = Record::new(SourceLevel::Error, "a\0b");
        assert!(matches!(
            StdFormatter::default().format(&record),
            Err(FormatError::InvalidMessage { .. })
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_formatter() {
        let record = fixed_record().with_field("user", "bob");
        let out = JsonFormatter.format(&record).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["level"], "info");
        assert_eq!(value["message"], "hello");
        assert_eq!(value["fields"]["user"], "bob");
        assert!(out.ends_with(b"\n"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_formatter_rejects_bad_key() {
        let record = fixed_record().with_field("", "x");
        assert!(JsonFormatter.format(&record).is_err());
    }
}
