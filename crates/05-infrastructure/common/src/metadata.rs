//! 元数据定义
//!
//! 组件类型的声明式描述：类型标记、注入点和请求处理器。
//! 描述符由 `component-macros` 生成，也可以手工构建。

use crate::component::Bean;
use crate::conventions::simple_name;
use crate::errors::ComponentError;

/// 组件工厂函数类型（无参构造路径）
pub type ComponentFactoryFn = fn() -> Result<Bean, ComponentError>;

/// 命名服务标记
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTag {
    /// 显式组件名称
    pub name: Option<String>,
}

impl ServiceTag {
    /// 非空白的显式名称
    pub fn explicit_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// 注入点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPoint {
    /// 字段名称
    pub field: String,
    /// 显式目标名称
    pub explicit_name: Option<String>,
    /// 字段声明的类型标识
    pub declared_type: String,
}

impl InjectionPoint {
    /// 创建新的注入点
    pub fn new(field: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            explicit_name: None,
            declared_type: declared_type.into(),
        }
    }

    /// 设置显式目标名称
    pub fn with_explicit_name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    /// 解析目标名称：显式名称（去空白后非空）优先，否则使用声明类型标识
    pub fn target_name(&self) -> &str {
        self.explicit_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.declared_type)
    }
}

/// 请求参数的声明类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `i32`
    Integer,
    /// `i64`
    Long,
    /// 原样传递的字符串
    Text,
}

impl ParamType {
    /// 类型名称（用于诊断信息）
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Integer => "i32",
            ParamType::Long => "i64",
            ParamType::Text => "String",
        }
    }
}

/// 处理器参数描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamDescriptor {
    /// 请求对象
    Request,
    /// 响应对象
    Response,
    /// 命名且带类型的请求参数
    Named { name: String, ty: ParamType },
}

impl ParamDescriptor {
    /// 创建命名请求参数
    pub fn named(name: impl Into<String>, ty: ParamType) -> Self {
        Self::Named {
            name: name.into(),
            ty,
        }
    }
}

/// 处理器描述：单个路由目标方法的参数绑定计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDescriptor {
    /// 方法名称
    pub name: String,
    /// 方法声明的路由路径（未规范化）
    pub path: String,
    /// 按声明顺序排列的参数
    pub params: Vec<ParamDescriptor>,
}

impl HandlerDescriptor {
    /// 创建新的处理器描述
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// 追加参数
    pub fn with_param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// 完全限定的类型标识
    pub type_path: String,
    /// 简单类型名称
    pub simple_name: String,
    /// 组件标记（控制器风格，按默认命名规则注册）
    pub component: bool,
    /// 控制器标记
    pub controller: bool,
    /// 命名服务标记
    pub service: Option<ServiceTag>,
    /// 控制器级路由路径
    pub base_path: Option<String>,
    /// 声明实现的能力（trait 标识）
    pub capabilities: Vec<String>,
    /// 注入点
    pub injection_points: Vec<InjectionPoint>,
    /// 请求处理器
    pub handlers: Vec<HandlerDescriptor>,
    /// 无参构造路径
    pub factory: Option<ComponentFactoryFn>,
}

impl TypeDescriptor {
    /// 创建新的类型描述符
    pub fn new(type_path: impl Into<String>) -> Self {
        let type_path = type_path.into();
        Self {
            simple_name: simple_name(&type_path).to_string(),
            type_path,
            component: false,
            controller: false,
            service: None,
            base_path: None,
            capabilities: Vec::new(),
            injection_points: Vec::new(),
            handlers: Vec::new(),
            factory: None,
        }
    }

    /// 设置组件标记
    pub fn component(mut self) -> Self {
        self.component = true;
        self
    }

    /// 设置控制器标记（控制器同时是组件）
    pub fn controller(mut self) -> Self {
        self.component = true;
        self.controller = true;
        self
    }

    /// 设置命名服务标记
    pub fn service(mut self, name: Option<&str>) -> Self {
        self.service = Some(ServiceTag {
            name: name.map(str::to_string),
        });
        self
    }

    /// 设置控制器级路由路径
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// 添加能力
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// 添加注入点
    pub fn with_injection_point(mut self, point: InjectionPoint) -> Self {
        self.injection_points.push(point);
        self
    }

    /// 添加处理器
    pub fn with_handler(mut self, handler: HandlerDescriptor) -> Self {
        self.handlers.push(handler);
        self
    }

    /// 批量添加处理器
    pub fn with_handlers(mut self, handlers: impl IntoIterator<Item = HandlerDescriptor>) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// 设置工厂函数
    pub fn with_factory(mut self, factory: ComponentFactoryFn) -> Self {
        self.factory = Some(factory);
        self
    }

    /// 是否由容器托管
    pub fn is_managed(&self) -> bool {
        self.component || self.service.is_some()
    }
}
