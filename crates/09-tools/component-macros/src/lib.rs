//! # Component Macros
//!
//! 这个 crate 提供了用于声明容器托管组件和请求处理器的过程宏。
//!
//! ## 核心宏
//!
//! - [`component`] - 按默认命名规则注册的组件
//! - [`controller`] - 控制器组件，处理器由 [`routes`] 声明
//! - [`service`] - 命名服务，可按显式名称或能力 trait 注册
//! - [`routes`] - 控制器处理器表
//!
//! 标记宏在程序启动时通过 `ctor` 把类型描述符注册到全局类型表，
//! 使用方需要同时依赖 `xmvc-common` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{controller, routes, service};
//! use xmvc_common::{Autowired, Response};
//!
//! pub trait UserService: Send + Sync {
//!     fn find(&self, name: &str) -> String;
//! }
//!
//! #[service(provides(UserService))]
//! #[derive(Debug, Default)]
//! pub struct UserServiceImpl;
//!
//! #[controller]
//! #[request_mapping("/user")]
//! #[derive(Debug, Default)]
//! pub struct UserController {
//!     #[autowired]
//!     user_service: Autowired<dyn UserService>,
//! }
//!
//! #[routes]
//! impl UserController {
//!     #[request_mapping("/query")]
//!     fn query(&self, resp: &mut dyn Response, #[request_param("name")] name: String) -> anyhow::Result<()> {
//!         resp.write(&self.user_service.require()?.find(&name))?;
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod component;
mod routes;
mod utils;

use component::ComponentKind;

// Re-exports are not allowed in proc-macro crates

/// 组件标记宏
///
/// 注册名称为类型简单名称首字母小写，例如 `UserController` → `userController`。
///
/// # 参数
///
/// - `constructor = "path"` - 返回 `Result<Self, E>` 的构造函数（默认为 `Default::default`）
///
/// 字段上的 `#[autowired]` / `#[autowired("name")]` 声明注入点，字段类型必须为 `Autowired<T>`。
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(ComponentKind::Component, args, input)
}

/// 控制器标记宏
///
/// 与 [`component`] 相同，并且其处理器参与路由表构建。结构体上紧随其后的
/// `#[request_mapping("/base")]` 声明控制器级路径前缀。控制器必须有一个 [`routes`] impl 块。
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(ComponentKind::Controller, args, input)
}

/// 命名服务标记宏
///
/// # 参数
///
/// - `name = "svc"` 或 `"svc"` - 显式组件名称，只在该名称下注册
/// - `provides(TraitA, TraitB)` - 未给出名称时，在每个能力 trait 的类型标识下各注册一次
/// - `constructor = "path"` - 自定义构造函数
///
/// 能力 trait 必须以 `Send + Sync` 为父 trait。
#[proc_macro_attribute]
pub fn service(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(ComponentKind::Service, args, input)
}

/// 控制器处理器表宏
///
/// 放在控制器的 inherent impl 块上。带 `#[request_mapping("/path")]` 的方法成为处理器，
/// 参数可以是 `&dyn Request`、`&mut dyn Response`（至多一个），或带
/// `#[request_param("name")]` 的 `i32` / `i64` / `String` / `&str`。
/// 返回值为 `()` 或 `Result<(), E>`。
#[proc_macro_attribute]
pub fn routes(args: TokenStream, input: TokenStream) -> TokenStream {
    routes::routes_impl(args, input)
}
