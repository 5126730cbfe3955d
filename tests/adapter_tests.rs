// 测试 adapter 入口：构造的 logger 已注册 hook，前端输出被丢弃
#[cfg(test)]
mod adapter_tests {
    use sevhook::adapter::{SinkLoggerBuilder, logger_from_config, new_sink_logger};
    use sevhook::config::Config;
    use sevhook::formatter::Flags;
    use sevhook::hook::{Hook, RoutingPolicy};
    use sevhook::level::{SourceLevel, TargetSeverity};
    use sevhook::level_map::LevelMap;
    use sevhook::logger::Logger;
    use sevhook::record::{Fields, Record};
    use sevhook::sink::{FileSink, MemorySink, SinkContext};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// 记录写入次数的输出，用来确认前端输出被丢弃
    #[derive(Clone, Default)]
    struct CountingWriter(Arc<Mutex<usize>>);

    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            *self.0.lock().unwrap() += 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 只订阅 error 的计数 hook
    struct ErrorOnlyHook {
        levels: Vec<SourceLevel>,
        fired: Arc<Mutex<Vec<String>>>,
    }

    impl Hook for ErrorOnlyHook {
        fn levels(&self) -> &[SourceLevel] {
            &self.levels
        }

        fn fire(&self, record: &Record) -> sevhook::Result<()> {
            self.fired.lock().unwrap().push(record.message.clone());
            Ok(())
        }
    }

    fn memory_logger(map: Option<LevelMap>) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = new_sink_logger(
            Box::new(io::stdout()),
            "svc: ",
            Flags::NONE,
            map,
            sink.clone(),
            SinkContext::from_request("req-1"),
        );
        (logger, sink)
    }

    /// 构造函数注册了一个 hook
    #[test]
    fn test_new_sink_logger_registers_hook() {
        let (logger, _) = memory_logger(None);
        assert_eq!(logger.hook_count(), 1);
        assert_eq!(logger.prefix(), "svc: ");
        assert_eq!(logger.flags(), Flags::NONE);
    }

    /// 前端自身输出被替换为丢弃
    #[test]
    fn test_frontend_output_is_discarded() {
        let writer = CountingWriter::default();
        let sink = Arc::new(MemorySink::new());
        let logger = new_sink_logger(
            Box::new(writer.clone()),
            "",
            Flags::STD,
            None,
            sink.clone(),
            SinkContext::default(),
        );

        logger.log(SourceLevel::Info, "hello").unwrap();
        assert_eq!(*writer.0.lock().unwrap(), 0);
        assert_eq!(sink.count(TargetSeverity::Info), 1);
    }

    /// 每个级别都经由 hook 写入对应的严重级别
    #[test]
    fn test_every_level_routed_with_default_map() {
        let (logger, sink) = memory_logger(None);
        for level in SourceLevel::ALL {
            logger.log(level, level.as_str()).unwrap();
        }

        let severities: Vec<_> = sink.calls().into_iter().map(|c| c.severity).collect();
        assert_eq!(
            severities,
            vec![
                TargetSeverity::Debug,
                TargetSeverity::Debug,
                TargetSeverity::Info,
                TargetSeverity::Warning,
                TargetSeverity::Error,
                TargetSeverity::Critical,
            ]
        );
    }

    /// 自定义映射只订阅列出的级别
    #[test]
    fn test_custom_map_gates_subscription() {
        let map: LevelMap = [(SourceLevel::Info, TargetSeverity::Critical)]
            .into_iter()
            .collect();
        let (logger, sink) = memory_logger(Some(map));

        logger.log(SourceLevel::Error, "not subscribed").unwrap();
        logger.log(SourceLevel::Info, "subscribed").unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, TargetSeverity::Critical);
        assert_eq!(calls[0].message, "svc: [info] subscribed");
    }

    /// print 解析级别前缀并附带元数据
    #[test]
    fn test_print_with_prefix_and_fields() {
        let (logger, sink) = memory_logger(None);
        let mut fields = Fields::new();
        fields.insert("host".to_string(), "db1".to_string());

        logger.print_with("alert: replication lag", fields).unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, TargetSeverity::Critical);
        assert_eq!(calls[0].message, "svc: [alert] replication lag host=db1");
    }

    /// 格式化失败与 sink 错误都返回给调用方
    #[test]
    fn test_errors_surface_to_caller() {
        let (logger, sink) = memory_logger(None);
        let mut fields = Fields::new();
        fields.insert("bad key".to_string(), "v".to_string());

        assert!(logger.log_with(SourceLevel::Error, "x", fields).is_err());
        assert!(sink.is_empty());

        let rejecting = Arc::new(MemorySink::rejecting("down"));
        let logger = new_sink_logger(
            Box::new(io::sink()),
            "",
            Flags::NONE,
            None,
            rejecting,
            SinkContext::default(),
        );
        let err = logger.log(SourceLevel::Error, "x").unwrap_err();
        assert!(err.to_string().contains("down"));
    }

    /// 多个异构 hook：只调用订阅了该级别的 hook
    #[test]
    fn test_multiple_hooks_filtered_by_levels() {
        let (mut logger, sink) = memory_logger(None);
        let fired = Arc::new(Mutex::new(Vec::new()));
        logger.add_hook(Box::new(ErrorOnlyHook {
            levels: vec![SourceLevel::Error],
            fired: fired.clone(),
        }));

        logger.log(SourceLevel::Info, "info").unwrap();
        logger.log(SourceLevel::Error, "error").unwrap();

        assert_eq!(*fired.lock().unwrap(), vec!["error".to_string()]);
        assert_eq!(sink.len(), 2);
    }

    /// 构建器：默认表路由与最低级别
    #[test]
    fn test_builder_options() {
        let sink = Arc::new(MemorySink::new());
        let map: LevelMap = [
            (SourceLevel::Debug, TargetSeverity::Error),
            (SourceLevel::Info, TargetSeverity::Critical),
        ]
        .into_iter()
        .collect();
        let logger = SinkLoggerBuilder::new(sink.clone(), SinkContext::from_request("b"))
            .flags(Flags::NONE)
            .level_map(Some(map))
            .routing(RoutingPolicy::DefaultTable)
            .min_level(SourceLevel::Info)
            .build(Box::new(io::sink()));

        logger.log(SourceLevel::Debug, "filtered").unwrap();
        logger.log(SourceLevel::Info, "routed").unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, TargetSeverity::Info);
    }

    /// 从配置构建 logger，写入文件 sink
    #[test]
    fn test_logger_from_config_with_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/app.log");

        let toml = r#"
[hook]
prefix = "api: "
flags = []

[level_map]
warning = "critical"

[sink]
kind = "file"
request_id = "req-9"

[sink.labels]
zone = "eu"
"#;
        let cfg = Config::from_str(toml, "inline.toml".into()).unwrap();
        let sink = Arc::new(FileSink::open(&path).unwrap());
        let logger = logger_from_config(&cfg, sink).unwrap();

        logger.log(SourceLevel::Warning, "quota low").unwrap();
        logger.log(SourceLevel::Info, "ignored").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[CRITICAL] req-9 zone=eu | api: [warning] quota low\n");
    }

    /// JSON hook 已送达的记录返回 Ok，被丢弃的前端输出不再渲染
    #[cfg(feature = "json")]
    #[test]
    fn test_json_hook_delivery_returns_ok() {
        use sevhook::formatter::JsonFormatter;

        let sink = Arc::new(MemorySink::new());
        let logger = SinkLoggerBuilder::new(sink.clone(), SinkContext::from_request("j"))
            .formatter(Box::new(JsonFormatter))
            .build(Box::new(io::stdout()));
        assert!(logger.is_output_discarded());

        logger.log(SourceLevel::Alert, "a\0b").unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].severity, TargetSeverity::Critical);
        assert!(calls[0].message.contains(r#""message":"a\u0000b""#));
    }
}
