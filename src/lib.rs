// Library entry point
pub mod adapter;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod hook;
pub mod level;
pub mod level_map;
pub mod logger;
pub mod logging;
pub mod record;
pub mod sink;

pub use adapter::{SinkLoggerBuilder, new_sink_logger};
pub use error::{Error, FormatError, Result, SinkError};
pub use formatter::{Flags, Formatter, StdFormatter};
pub use hook::{DispatchHook, Hook, RoutingPolicy};
pub use level::{SourceLevel, TargetSeverity};
pub use level_map::LevelMap;
pub use logger::Logger;
pub use record::{Fields, Record};
pub use sink::{Sink, SinkContext};
