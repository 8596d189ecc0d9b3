//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，按初始化阶段定义容器和请求分发的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeCatalog`] - 类型目录（扫描命名空间）
//! - [`ComponentRegistry`] - 组件注册表（名称 → 实例）
//! - [`DependencyInjector`] - 依赖注入器
//! - [`RouteBuilder`] - 路由表构建器
//! - [`RequestDispatcher`] - 请求分发器

pub mod container;
pub mod dispatcher;
pub mod registry;
pub mod resolver;
pub mod routing;
pub mod scanner;

pub use container::*;
pub use dispatcher::*;
pub use registry::*;
pub use resolver::*;
pub use routing::*;
pub use scanner::*;
