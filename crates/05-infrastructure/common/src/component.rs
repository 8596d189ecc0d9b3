//! 组件基础接口定义
//!
//! 提供所有容器托管组件必须实现的基础 trait，以及容器中的实例、
//! 依赖槽和处理器参数的表示。

use crate::conventions::type_identifier;
use crate::errors::{DependencyError, DispatchError};
use crate::http::{Request, Response};
use crate::metadata::HandlerDescriptor;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// 处理器执行结果
pub type HandlerResult = anyhow::Result<()>;

/// 组件基础 trait
///
/// 所有容器托管组件都必须实现此 trait，通常由 `#[component]`、
/// `#[controller]` 或 `#[service]` 宏生成。
pub trait Component: Send + Sync + Debug + 'static {
    /// 注入 setter：把 `bean` 写入名为 `field` 的注入点
    fn inject(&self, field: &str, _bean: &Bean) -> Result<(), DependencyError> {
        Err(DependencyError::UnknownInjectionPoint {
            owner: type_identifier::<Self>(),
            field: field.to_string(),
        })
    }

    /// 调用名为 `handler` 的请求处理器
    fn invoke(&self, handler: &str, _args: HandlerArguments<'_>) -> HandlerResult {
        Err(DispatchError::UnknownHandler {
            owner: type_identifier::<Self>(),
            handler: handler.to_string(),
        }
        .into())
    }
}

/// 控制器处理器表
///
/// 由 `#[routes]` 宏为控制器的 impl 块生成。
pub trait RouteHandlers {
    /// 处理器描述列表
    fn handler_descriptors() -> Vec<HandlerDescriptor>
    where
        Self: Sized;

    /// 按名称调用处理器
    fn invoke_handler(&self, handler: &str, args: HandlerArguments<'_>) -> HandlerResult;
}

/// 容器中的组件实例
///
/// 同一实例可以在多个名称下注册，克隆只复制引用。
#[derive(Clone)]
pub struct Bean {
    type_name: String,
    instance: Arc<dyn Component>,
    /// 每个视图都是一个 `Arc<V>`，`V` 为具体类型或声明的能力 trait object
    views: Vec<Arc<dyn Any + Send + Sync>>,
}

impl Bean {
    /// 从具体实例创建
    pub fn new<T: Component>(instance: Arc<T>) -> Self {
        let concrete: Arc<dyn Any + Send + Sync> = Arc::new(instance.clone());
        Self {
            type_name: type_identifier::<T>(),
            instance,
            views: vec![concrete],
        }
    }

    /// 添加能力视图，例如 `Arc<dyn UserService>`
    pub fn with_view<V: ?Sized + Send + Sync + 'static>(mut self, view: Arc<V>) -> Self {
        self.views.push(Arc::new(view));
        self
    }

    /// 获取指定类型的视图
    pub fn view<V: ?Sized + 'static>(&self) -> Option<Arc<V>> {
        self.views
            .iter()
            .find_map(|view| view.downcast_ref::<Arc<V>>().cloned())
    }

    /// 组件实例
    pub fn component(&self) -> &Arc<dyn Component> {
        &self.instance
    }

    /// 具体类型标识
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 是否为同一个实例
    pub fn same_instance(&self, other: &Bean) -> bool {
        self.instance_addr() == other.instance_addr()
    }

    /// 实例地址（忽略 vtable）
    pub fn instance_addr(&self) -> *const u8 {
        Arc::as_ptr(&self.instance).cast::<u8>()
    }
}

impl Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("type_name", &self.type_name)
            .field("views", &self.views.len())
            .finish()
    }
}

/// 可注入的依赖槽
///
/// 由容器的注入阶段通过 [`Autowired::inject_from`] 写入，组件自身只读。
pub struct Autowired<T: ?Sized> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Autowired<T> {
    /// 创建空的依赖槽
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// 声明类型标识
    pub fn declared_type() -> String {
        type_identifier::<T>()
    }

    /// 获取已注入的依赖
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// 获取已注入的依赖，未注入时返回错误
    pub fn require(&self) -> Result<Arc<T>, DependencyError> {
        self.get().ok_or_else(|| DependencyError::NotInjected {
            type_name: type_identifier::<T>(),
        })
    }

    /// 是否已注入
    pub fn is_injected(&self) -> bool {
        self.slot.read().is_some()
    }

    /// 从容器实例注入，覆盖原有值
    pub fn inject_from(&self, owner: &str, field: &str, bean: &Bean) -> Result<(), DependencyError> {
        let view = bean
            .view::<T>()
            .ok_or_else(|| DependencyError::TypeMismatch {
                owner: owner.to_string(),
                field: field.to_string(),
                expected: type_identifier::<T>(),
                actual: bean.type_name().to_string(),
            })?;
        *self.slot.write() = Some(view);
        Ok(())
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("type", &std::any::type_name::<T>())
            .field("injected", &self.slot.read().is_some())
            .finish()
    }
}

/// 已绑定的处理器参数
pub enum Argument<'a> {
    /// 请求对象
    Request(&'a dyn Request),
    /// 响应对象
    Response(&'a mut dyn Response),
    /// `i32` 参数
    Integer(i32),
    /// `i64` 参数
    Long(i64),
    /// 字符串参数
    Text(String),
}

impl Argument<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Argument::Request(_) => "request",
            Argument::Response(_) => "response",
            Argument::Integer(_) => "i32",
            Argument::Long(_) => "i64",
            Argument::Text(_) => "String",
        }
    }
}

impl Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Integer(value) => write!(f, "Integer({})", value),
            Argument::Long(value) => write!(f, "Long({})", value),
            Argument::Text(value) => write!(f, "Text({:?})", value),
            other => f.write_str(other.kind()),
        }
    }
}

/// 按声明顺序排列的处理器参数
///
/// 生成的处理器代码按位置依次取出参数。
#[derive(Debug, Default)]
pub struct HandlerArguments<'a> {
    args: VecDeque<Argument<'a>>,
    position: usize,
}

impl<'a> HandlerArguments<'a> {
    /// 创建空参数列表
    pub fn new() -> Self {
        Self {
            args: VecDeque::new(),
            position: 0,
        }
    }

    /// 追加参数
    pub fn push(&mut self, arg: Argument<'a>) {
        self.args.push_back(arg);
    }

    /// 剩余参数数量
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// 是否没有剩余参数
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    fn next_arg(&mut self, expected: &'static str) -> Result<Argument<'a>, DispatchError> {
        let position = self.position;
        self.position += 1;
        self.args
            .pop_front()
            .ok_or(DispatchError::ArgumentMismatch { position, expected })
    }

    fn mismatch(&self, expected: &'static str) -> DispatchError {
        DispatchError::ArgumentMismatch {
            position: self.position - 1,
            expected,
        }
    }

    /// 取出请求对象
    pub fn next_request(&mut self) -> Result<&'a dyn Request, DispatchError> {
        match self.next_arg("request")? {
            Argument::Request(request) => Ok(request),
            _ => Err(self.mismatch("request")),
        }
    }

    /// 取出响应对象
    pub fn next_response(&mut self) -> Result<&'a mut dyn Response, DispatchError> {
        match self.next_arg("response")? {
            Argument::Response(response) => Ok(response),
            _ => Err(self.mismatch("response")),
        }
    }

    /// 取出 `i32` 参数
    pub fn next_integer(&mut self) -> Result<i32, DispatchError> {
        match self.next_arg("i32")? {
            Argument::Integer(value) => Ok(value),
            _ => Err(self.mismatch("i32")),
        }
    }

    /// 取出 `i64` 参数
    pub fn next_long(&mut self) -> Result<i64, DispatchError> {
        match self.next_arg("i64")? {
            Argument::Long(value) => Ok(value),
            _ => Err(self.mismatch("i64")),
        }
    }

    /// 取出字符串参数
    pub fn next_text(&mut self) -> Result<String, DispatchError> {
        match self.next_arg("String")? {
            Argument::Text(value) => Ok(value),
            _ => Err(self.mismatch("String")),
        }
    }
}

/// 处理器返回值到 [`HandlerResult`] 的转换
pub trait IntoHandlerResult {
    /// 转换为处理器结果
    fn into_handler_result(self) -> HandlerResult;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> HandlerResult {
        Ok(())
    }
}

impl<E> IntoHandlerResult for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}
