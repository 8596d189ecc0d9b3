//! 请求分发器实现
//!
//! 每个请求独立完成：规范化路径、查找路由、绑定参数、调用处理器。
//! 任何失败（包括处理器 panic）都被转换为错误响应体，不会传播给宿主。

use di_abstractions::{
    ComponentRegistry, DispatchOutcome, RequestDispatcher, RouteEntry, RouteTable, NOT_FOUND_BODY,
    SERVER_ERROR_PREFIX,
};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info_span, warn};
use uuid::Uuid;
use xmvc_common::{
    normalize_path, Argument, DispatchError, HandlerArguments, HandlerDescriptor, HandlerResult,
    ParamDescriptor, ParamType, Request, Response,
};

/// 请求分发器
///
/// 初始化完成后只读，可在多个线程间共享。
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<dyn ComponentRegistry>,
    routes: Arc<RouteTable>,
}

impl Dispatcher {
    /// 创建新的分发器
    pub fn new(registry: Arc<dyn ComponentRegistry>, routes: Arc<RouteTable>) -> Self {
        Self { registry, routes }
    }

    /// 路由表
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// 计算请求的路由键：去掉上下文路径前缀后规范化
    ///
    /// 上下文路径按整段匹配，`/app` 不会从 `/application` 中剥离。
    pub fn route_key(request: &dyn Request) -> String {
        let path = request.path();
        let context_path = request.context_path().trim_end_matches('/');
        let relative = if context_path.is_empty() {
            path
        } else {
            path.strip_prefix(context_path)
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
                .unwrap_or(path)
        };
        normalize_path(relative)
    }

    fn execute(
        &self,
        entry: &RouteEntry,
        request: &dyn Request,
        response: &mut dyn Response,
    ) -> HandlerResult {
        let args = bind_arguments(&entry.handler, request, response)?;
        let registration = self
            .registry
            .get(&entry.bean_name)
            .ok_or_else(|| DispatchError::BeanNotFound {
                name: entry.bean_name.clone(),
            })?;
        registration.bean.component().invoke(&entry.handler.name, args)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("components", &self.registry.len())
            .field("routes", &self.routes.len())
            .finish()
    }
}

impl RequestDispatcher for Dispatcher {
    fn dispatch(&self, request: &dyn Request, response: &mut dyn Response) -> DispatchOutcome {
        let key = Self::route_key(request);
        let span = info_span!("dispatch", request_id = %Uuid::new_v4(), path = %key);
        let _guard = span.enter();

        let Some(entry) = self.routes.get(&key) else {
            debug!("路由未命中");
            if let Err(err) = response.write(NOT_FOUND_BODY) {
                warn!("写入响应失败: {}", err);
            }
            return DispatchOutcome::NotFound;
        };

        debug!("路由命中: {}", entry.target());
        let result = catch_unwind(AssertUnwindSafe(|| self.execute(entry, request, &mut *response)))
            .unwrap_or_else(|payload| {
                Err(DispatchError::Panicked {
                    message: panic_message(payload.as_ref()),
                }
                .into())
            });

        match result {
            Ok(()) => DispatchOutcome::Completed,
            Err(err) => {
                error!("请求处理失败: {} -> {:#}", entry.target(), err);
                let body = format!("{}{:?}", SERVER_ERROR_PREFIX, err);
                if let Err(write_err) = response.write(&body) {
                    warn!("写入错误响应失败: {}", write_err);
                }
                DispatchOutcome::Failed
            }
        }
    }
}

/// 按声明顺序绑定处理器参数
///
/// 请求对象可以出现多次；响应对象只能出现一次。
pub fn bind_arguments<'a>(
    handler: &HandlerDescriptor,
    request: &'a dyn Request,
    response: &'a mut dyn Response,
) -> Result<HandlerArguments<'a>, DispatchError> {
    let mut response = Some(response);
    let mut args = HandlerArguments::new();

    for param in &handler.params {
        let arg = match param {
            ParamDescriptor::Request => Argument::Request(request),
            ParamDescriptor::Response => {
                let response = response.take().ok_or_else(|| DispatchError::DuplicateResponse {
                    handler: handler.name.clone(),
                })?;
                Argument::Response(response)
            }
            ParamDescriptor::Named { name, ty } => {
                let value = request
                    .parameter(name)
                    .ok_or_else(|| DispatchError::MissingParameter { name: name.clone() })?;
                coerce(name, value, *ty)?
            }
        };
        args.push(arg);
    }

    Ok(args)
}

/// 把查询参数值转换为声明类型
fn coerce<'a>(name: &str, value: &str, ty: ParamType) -> Result<Argument<'a>, DispatchError> {
    let invalid = |source| DispatchError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
        expected: ty.as_str(),
        source,
    };

    match ty {
        ParamType::Integer => value.parse::<i32>().map(Argument::Integer).map_err(invalid),
        ParamType::Long => value.parse::<i64>().map(Argument::Long).map_err(invalid),
        ParamType::Text => Ok(Argument::Text(value.to_string())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
