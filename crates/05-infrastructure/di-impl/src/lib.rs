//! # 依赖注入具体实现
//!
//! 提供类型目录、组件注册器、字段注入器、路由表构建器和请求分发器的具体实现。
//!
//! 初始化按固定顺序进行：扫描 → 实例化与注册 → 注入 → 构建路由表，
//! 完成后容器和路由表只读，由 [`Dispatcher`] 在并发请求间共享。

pub mod catalog;
pub mod container;
pub mod dispatcher;
pub mod injector;
pub mod routing;

pub use catalog::{GlobalTypeCatalog, StaticTypeCatalog};
pub use container::{registered_names, ComponentRegistrar, Container};
pub use dispatcher::{bind_arguments, Dispatcher};
pub use injector::FieldInjector;
pub use routing::ControllerRouteBuilder;
