use log::{debug, error, info, warn};

use crate::error::{Error, FileError, Result};
use std::fs;
use std::path::Path;

/// 默认配置文件内容
pub const DEFAULT_CONFIG: &str = r#"# sevhook 配置文件

[logging]
# 工具自身诊断日志级别: trace, debug, info, warn, error
level = "info"

[hook]
# 消息前缀
prefix = ""
# 格式化标志: date, time, microseconds, longfile, shortfile, utc, msgprefix, std
flags = ["std"]
# 路由策略: instance（使用本实例映射表）/ default（总是使用默认映射表）
routing = "instance"
# 格式化器: std / json
formatter = "std"
# 前端最低级别: trace, debug, info, warning, error, alert
min_level = "trace"

# 自定义级别映射（前端级别 = 平台严重级别），留空使用默认映射:
# trace/debug -> debug, info -> info, warning -> warning, error -> error, alert -> critical
# 未列出的级别不会被 hook 订阅；直接分发时回退到默认映射
[level_map]
# info = "critical"

[sink]
# sink 类型: console / file / noop
kind = "console"
# file sink 输出路径
file = "logs/sevhook.log"
# 写入上下文的请求标识
request_id = "local"

[sink.labels]
# service = "api"
"#;

/// 生成默认配置文件
pub fn handle_init(output_path: &str, force: bool) -> Result<()> {
    let path = Path::new(output_path);

    info!("准备生成配置文件: {output_path}");

    // 检查文件是否已存在
    let existed = path.exists();
    if existed && !force {
        error!("配置文件已存在: {output_path}");
        info!("提示: 使用 --force 参数强制覆盖");
        return Err(Error::File(FileError::AlreadyExists {
            path: path.to_path_buf(),
        }));
    }

    if existed {
        warn!("将覆盖已存在的配置文件");
    }

    // 创建目录（如果需要）
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        debug!("创建目录: {}", parent.display());
        fs::create_dir_all(parent).map_err(|e| {
            Error::File(FileError::CreateDirectoryFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
    }

    // 写入配置文件
    fs::write(path, DEFAULT_CONFIG).map_err(|e| {
        Error::File(FileError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    if existed {
        info!("配置文件已覆盖: {output_path}");
    } else {
        info!("配置文件已生成: {output_path}");
    }

    info!("下一步:");
    info!("  1. 编辑配置文件: {output_path}");
    info!("  2. 验证配置: sevhook validate -c {output_path}");
    info!("  3. 发送记录: sevhook emit -c {output_path} \"alert: disk full\"");

    Ok(())
}
