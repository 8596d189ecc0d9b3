//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {name}")]
    ComponentNotRegistered { name: String },

    #[error("注入类型不匹配: {owner}.{field} 期望 {expected}, 实际组件类型 {actual}")]
    TypeMismatch {
        owner: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("未知的注入点: {owner}.{field}")]
    UnknownInjectionPoint { owner: String, field: String },

    #[error("依赖尚未注入: {type_name}")]
    NotInjected { type_name: String },
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("扫描命名空间不存在: {namespace}")]
    NamespaceNotFound { namespace: String },

    #[error("组件缺少无参构造路径: {type_name}")]
    NoConstructor { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ConstructionFailed {
        type_name: String,
        source: anyhow::Error,
    },

    #[error("组件名称冲突: {name} ({previous} 被 {current} 覆盖)")]
    NameCollision {
        name: String,
        previous: String,
        current: String,
    },
}

impl ComponentError {
    /// 创建构造失败错误
    pub fn construction_failed(type_name: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 路由表错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("路由冲突: {path} ({previous} 被 {current} 覆盖)")]
    Collision {
        path: String,
        previous: String,
        current: String,
    },
}

/// 请求分发错误类型
///
/// 只影响单个请求，由分发边界转换为错误响应体。
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("缺少请求参数: {name}")]
    MissingParameter { name: String },

    #[error("请求参数类型转换失败: {name}={value:?}, 期望 {expected}")]
    InvalidParameter {
        name: String,
        value: String,
        expected: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("处理器参数不匹配: 位置 {position}, 期望 {expected}")]
    ArgumentMismatch {
        position: usize,
        expected: &'static str,
    },

    #[error("处理器声明了多个响应参数: {handler}")]
    DuplicateResponse { handler: String },

    #[error("路由目标组件不存在: {name}")]
    BeanNotFound { name: String },

    #[error("未知的处理器: {owner}::{handler}")]
    UnknownHandler { owner: String, handler: String },

    #[error("处理器执行异常: {message}")]
    Panicked { message: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("组件错误: {source}")]
    ComponentError {
        #[from]
        source: ComponentError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("路由错误: {source}")]
    RouteError {
        #[from]
        source: RouteError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_failed_keeps_source() {
        let err = ComponentError::construction_failed("demo::Pool", anyhow::anyhow!("连接被拒绝"));
        assert!(matches!(&err, ComponentError::ConstructionFailed { type_name, .. } if type_name == "demo::Pool"));
        assert!(err.to_string().contains("连接被拒绝"));
    }

    #[test]
    fn test_infrastructure_error_wraps_phase_errors() {
        let err: InfrastructureError = ComponentError::NamespaceNotFound {
            namespace: "demo".to_string(),
        }
        .into();
        assert!(matches!(err, InfrastructureError::ComponentError { .. }));
        assert!(err.to_string().contains("扫描命名空间不存在: demo"));
    }
}
