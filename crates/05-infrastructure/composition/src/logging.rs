//! 日志初始化

use crate::config_sources::LoggingSettings;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xmvc_common::InfrastructureError;

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先使用，否则使用配置中的级别。全局订阅者已安装时直接返回，
/// 因此可以重复调用。
pub fn init_logging(settings: &LoggingSettings) -> Result<(), InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志级别无效: {}: {}", settings.level, e),
        })?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if settings.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    match installed {
        Ok(()) => info!("日志系统初始化完成"),
        Err(e) => debug!("日志系统已初始化，跳过: {}", e),
    }
    Ok(())
}
