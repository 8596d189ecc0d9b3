//! 字段注入器

use di_abstractions::{
    ComponentRegistry, ContainerConfig, DependencyInjector, InitReport, InitWarning, InjectionSummary,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use xmvc_common::DependencyError;

/// 字段注入器
///
/// 在全部实例创建完成后运行一次。每个实例只处理一次，
/// 即使它以多个名称注册。
#[derive(Debug, Clone, Default)]
pub struct FieldInjector {
    config: ContainerConfig,
}

impl FieldInjector {
    /// 创建新的注入器
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }
}

impl DependencyInjector for FieldInjector {
    fn inject_all(
        &self,
        registry: &dyn ComponentRegistry,
        report: &mut InitReport,
    ) -> Result<InjectionSummary, DependencyError> {
        let mut summary = InjectionSummary::default();
        let mut visited = HashSet::new();

        for registration in registry.registrations() {
            if !visited.insert(registration.bean.instance_addr() as usize) {
                continue;
            }

            let owner = &registration.descriptor.type_path;
            for point in &registration.descriptor.injection_points {
                let target = point.target_name();

                match registry.get(target) {
                    Some(dependency) => {
                        registration
                            .bean
                            .component()
                            .inject(&point.field, &dependency.bean)?;
                        summary.injected += 1;
                        debug!("注入依赖: {}.{} <- {}", owner, point.field, target);
                    }
                    None if self.config.strictness.is_strict() => {
                        return Err(DependencyError::ComponentNotRegistered {
                            name: target.to_string(),
                        });
                    }
                    None => {
                        let warning = InitWarning::UnresolvedInjection {
                            owner: owner.clone(),
                            field: point.field.clone(),
                            target: target.to_string(),
                        };
                        warn!("{}", warning);
                        report.warn(warning);
                        summary.unresolved += 1;
                    }
                }
            }
        }

        info!(
            "依赖注入完成，已注入 {} 个，未解析 {} 个",
            summary.injected, summary.unresolved
        );
        Ok(summary)
    }
}
