//! 类型目录实现

use di_abstractions::{catalog_order, ScanTarget, TypeCatalog};
use std::collections::HashMap;
use tracing::{debug, info};
use xmvc_common::{registered_type_descriptors, ComponentError, TypeDescriptor};

/// 全局类型目录
///
/// 读取 `component-macros` 在程序启动时注册到全局类型表中的描述符。
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalTypeCatalog;

impl GlobalTypeCatalog {
    /// 创建全局类型目录
    pub fn new() -> Self {
        Self
    }
}

impl TypeCatalog for GlobalTypeCatalog {
    fn scan(&self, namespace: &str) -> Result<Vec<TypeDescriptor>, ComponentError> {
        scan_descriptors(registered_type_descriptors(), namespace)
    }

    fn name(&self) -> &str {
        "global"
    }
}

/// 静态类型目录
///
/// 使用显式给出的描述符列表，适用于测试和手工注册的宿主。
#[derive(Debug, Default, Clone)]
pub struct StaticTypeCatalog {
    descriptors: Vec<TypeDescriptor>,
}

impl StaticTypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加描述符
    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 注册描述符
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.descriptors.push(descriptor);
    }
}

impl TypeCatalog for StaticTypeCatalog {
    fn scan(&self, namespace: &str) -> Result<Vec<TypeDescriptor>, ComponentError> {
        scan_descriptors(self.descriptors.clone(), namespace)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// 过滤命名空间下的描述符并按目录顺序排列
///
/// 同一类型标识重复注册时保留最后一次注册。命名空间下没有任何类型时视为命名空间不存在。
fn scan_descriptors(
    descriptors: Vec<TypeDescriptor>,
    namespace: &str,
) -> Result<Vec<TypeDescriptor>, ComponentError> {
    let target = ScanTarget::new(namespace)?;
    debug!("开始扫描命名空间: {}", target.as_str());

    let mut by_path: HashMap<String, TypeDescriptor> = HashMap::new();
    for descriptor in descriptors {
        if target.contains(&descriptor.type_path) {
            by_path.insert(descriptor.type_path.clone(), descriptor);
        }
    }

    if by_path.is_empty() {
        return Err(ComponentError::NamespaceNotFound {
            namespace: target.as_str().to_string(),
        });
    }

    let mut scanned: Vec<TypeDescriptor> = by_path.into_values().collect();
    scanned.sort_by(catalog_order);

    info!("扫描命名空间 {} 完成，发现 {} 个类型", target.as_str(), scanned.len());
    Ok(scanned)
}
