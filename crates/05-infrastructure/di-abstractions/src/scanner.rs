//! 类型目录抽象接口
//!
//! 提供按命名空间枚举组件类型的能力

use xmvc_common::{normalize_namespace, ComponentError, TypeDescriptor};

/// 类型目录 trait
///
/// 给定根命名空间，按深度优先顺序返回其下（递归）的所有类型描述符。
pub trait TypeCatalog: Send + Sync {
    /// 扫描指定命名空间
    fn scan(&self, namespace: &str) -> Result<Vec<TypeDescriptor>, ComponentError>;

    /// 获取目录名称
    fn name(&self) -> &str;
}

/// 扫描目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    namespace: String,
}

impl ScanTarget {
    /// 创建扫描目标，命名空间会被规范化
    pub fn new(namespace: &str) -> Result<Self, ComponentError> {
        let namespace = normalize_namespace(namespace);
        if namespace.is_empty() {
            return Err(ComponentError::NamespaceNotFound { namespace });
        }
        Ok(Self { namespace })
    }

    /// 规范化后的命名空间
    pub fn as_str(&self) -> &str {
        &self.namespace
    }

    /// 类型标识是否位于此命名空间之下（按路径段匹配）
    pub fn contains(&self, type_path: &str) -> bool {
        type_path
            .strip_prefix(self.namespace.as_str())
            .map_or(false, |rest| rest.starts_with("::"))
    }
}

/// 深度优先的目录顺序
///
/// 按路径段逐段比较，每段按字节字典序，等价于对命名空间树做先序遍历。
/// 类型和子命名空间混合排序：大写开头的类型名排在小写的子命名空间之前，
/// 例如 `demo::controller::UserController` 先于 `demo::controller::admin::*`。
pub fn catalog_order(left: &TypeDescriptor, right: &TypeDescriptor) -> std::cmp::Ordering {
    left.type_path.split("::").cmp(right.type_path.split("::"))
}
