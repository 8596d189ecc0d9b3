//! 组件容器与注册器
//!
//! 注册器按目录顺序实例化组件并计算注册名称，容器保存名称到实例的映射。

use di_abstractions::{ComponentRegistration, ComponentRegistry, ContainerConfig, InitReport, InitWarning};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use xmvc_common::{lower_first, ComponentError, TypeDescriptor};

/// 组件容器：注册名称 → 组件实例
#[derive(Debug, Default)]
pub struct Container {
    registrations: BTreeMap<String, ComponentRegistration>,
}

impl Container {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入注册信息，返回被覆盖的旧注册信息
    pub fn insert(&mut self, registration: ComponentRegistration) -> Option<ComponentRegistration> {
        self.registrations
            .insert(registration.name.clone(), registration)
    }

    /// 不同实例数量（多名称注册的实例只计一次）
    pub fn distinct_instances(&self) -> usize {
        self.registrations
            .values()
            .map(|registration| registration.bean.instance_addr() as usize)
            .collect::<HashSet<_>>()
            .len()
    }

    /// 所有注册名称（按名称排序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.keys().map(String::as_str)
    }
}

impl ComponentRegistry for Container {
    fn get(&self, name: &str) -> Option<&ComponentRegistration> {
        self.registrations.get(name)
    }

    fn registrations(&self) -> Vec<&ComponentRegistration> {
        self.registrations.values().collect()
    }

    fn len(&self) -> usize {
        self.registrations.len()
    }
}

/// 计算类型的注册名称
///
/// - 组件标记：默认命名规则（简单名称首字母小写）
/// - 命名服务且有显式名称：该名称
/// - 命名服务无显式名称：每个声明的能力标识各一个；没有能力时使用自身类型标识
/// - 其他：不注册
pub fn registered_names(descriptor: &TypeDescriptor) -> Vec<String> {
    if descriptor.component {
        return vec![lower_first(&descriptor.simple_name)];
    }

    match &descriptor.service {
        Some(tag) => match tag.explicit_name() {
            Some(name) => vec![name.to_string()],
            None if descriptor.capabilities.is_empty() => vec![descriptor.type_path.clone()],
            None => descriptor.capabilities.clone(),
        },
        None => Vec::new(),
    }
}

/// 组件注册器
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistrar {
    config: ContainerConfig,
}

impl ComponentRegistrar {
    /// 创建新的注册器
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// 按顺序实例化并注册所有组件
    ///
    /// 任一组件缺少构造路径或构造失败都会中止注册，不返回部分容器。
    pub fn register_all(
        &self,
        descriptors: Vec<TypeDescriptor>,
        report: &mut InitReport,
    ) -> Result<Container, ComponentError> {
        let mut container = Container::new();

        for descriptor in descriptors {
            if !descriptor.is_managed() {
                debug!("跳过非组件类型: {}", descriptor.type_path);
                continue;
            }

            let names = registered_names(&descriptor);
            let factory = descriptor.factory.ok_or_else(|| ComponentError::NoConstructor {
                type_name: descriptor.type_path.clone(),
            })?;
            let bean = factory()?;
            let descriptor = Arc::new(descriptor);

            for name in names {
                let registration = ComponentRegistration {
                    name: name.clone(),
                    bean: bean.clone(),
                    descriptor: Arc::clone(&descriptor),
                };

                if let Some(previous) = container.insert(registration) {
                    if previous.bean.same_instance(&bean) {
                        continue;
                    }
                    self.on_collision(&name, &previous.descriptor.type_path, &descriptor.type_path, report)?;
                }
                debug!("注册组件: {} -> {}", name, descriptor.type_path);
            }
        }

        info!(
            "组件注册完成，{} 个名称，{} 个实例",
            container.len(),
            container.distinct_instances()
        );
        Ok(container)
    }

    fn on_collision(
        &self,
        name: &str,
        previous: &str,
        current: &str,
        report: &mut InitReport,
    ) -> Result<(), ComponentError> {
        if self.config.strictness.is_strict() {
            return Err(ComponentError::NameCollision {
                name: name.to_string(),
                previous: previous.to_string(),
                current: current.to_string(),
            });
        }

        let warning = InitWarning::NameCollision {
            name: name.to_string(),
            previous: previous.to_string(),
            current: current.to_string(),
        };
        warn!("{}", warning);
        report.warn(warning);
        Ok(())
    }
}
