//! # xmvc Common
//!
//! 这个 crate 提供了 xmvc 容器和请求分发层共享的基础类型。
//!
//! ## 核心组件
//!
//! - [`TypeDescriptor`] - 组件类型的元数据描述（标记、注入点、处理器）
//! - [`Component`] - 容器托管组件的基础 trait
//! - [`Bean`] - 容器中的组件实例及其类型视图
//! - [`Autowired`] - 可注入的依赖槽
//! - [`Request`] / [`Response`] - 宿主 HTTP 传输层的抽象
//!
//! ## 设计原则
//!
//! - 元数据在编译期由过程宏生成，运行时不做反射
//! - 容器在初始化完成后只读
//! - 注入通过显式的 setter 完成，不绕过封装

pub mod component;
pub mod conventions;
pub mod errors;
pub mod http;
pub mod metadata;

pub use component::*;
pub use conventions::*;
pub use errors::*;
pub use http::*;
pub use metadata::*;

/// 类型描述符构造函数
///
/// 描述符中的类型标识依赖 `std::any::type_name`，只能在运行时求值，
/// 因此全局表保存的是构造函数而不是描述符本身。
pub type DescriptorFn = fn() -> TypeDescriptor;

/// 全局类型表
static GLOBAL_TYPE_REGISTRY: once_cell::sync::Lazy<parking_lot::RwLock<Vec<DescriptorFn>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(Vec::new()));

/// 注册类型描述符
///
/// 由 `component-macros` 生成的 `ctor` 函数在程序启动时调用。
pub fn register_type_descriptor(descriptor: DescriptorFn) {
    GLOBAL_TYPE_REGISTRY.write().push(descriptor);
}

/// 获取所有注册的类型描述符（按注册顺序）
pub fn registered_type_descriptors() -> Vec<TypeDescriptor> {
    GLOBAL_TYPE_REGISTRY
        .read()
        .iter()
        .map(|descriptor| descriptor())
        .collect()
}
