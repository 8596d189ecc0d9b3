//! # 应用组合层
//!
//! 这个 crate 负责把配置、日志、组件容器和请求分发器组合成一个可运行的应用上下文。
//!
//! ## 主要功能
//!
//! - **配置加载**: 配置文件、环境变量和覆盖项按优先级合并
//! - **日志初始化**: 基于 `tracing-subscriber`
//! - **应用启动**: 扫描 → 注册 → 注入 → 路由，任一阶段失败即中止
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use xmvc_common::{SimpleRequest, TextResponse};
//! use xmvc_composition::ApplicationContext;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ApplicationContext::builder()
//!         .with_config_file("config/app.toml")
//!         .with_logging(true)
//!         .build()?;
//!
//!     let mut response = TextResponse::new();
//!     context.dispatch(&SimpleRequest::from_uri("/user/query?name=alice"), &mut response);
//!     println!("{}", response.body());
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod config_sources;
pub mod infrastructure;
pub mod logging;

pub use bootstrapper::ApplicationBootstrapper;
pub use builder::ApplicationBuilder;
pub use config_sources::{ApplicationSettings, LoggingSettings, ServerSettings, SettingsLoader};
pub use infrastructure::ApplicationContext;
pub use logging::init_logging;

// 重新导出错误类型
pub use xmvc_common::InfrastructureError;
