//! 控制器路由表构建

use di_abstractions::{
    ComponentRegistry, ContainerConfig, InitReport, InitWarning, RouteBuilder, RouteEntry, RouteTable,
};
use tracing::{debug, info, warn};
use xmvc_common::{join_route_path, RouteError};

/// 控制器路由表构建器
#[derive(Debug, Clone, Default)]
pub struct ControllerRouteBuilder {
    config: ContainerConfig,
}

impl ControllerRouteBuilder {
    /// 创建新的构建器
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }
}

impl RouteBuilder for ControllerRouteBuilder {
    fn build(
        &self,
        registry: &dyn ComponentRegistry,
        report: &mut InitReport,
    ) -> Result<RouteTable, RouteError> {
        let mut table = RouteTable::new();

        for registration in registry.registrations() {
            let descriptor = &registration.descriptor;
            if !descriptor.controller {
                continue;
            }

            let base_path = descriptor.base_path.as_deref().unwrap_or("");
            for handler in &descriptor.handlers {
                let entry = RouteEntry {
                    path: join_route_path(base_path, &handler.path),
                    bean_name: registration.name.clone(),
                    handler: handler.clone(),
                };
                debug!("映射路由: {} -> {}", entry.path, entry.target());

                let path = entry.path.clone();
                let current = entry.target();
                if let Some(previous) = table.insert(entry) {
                    if self.config.strictness.is_strict() {
                        return Err(RouteError::Collision {
                            path,
                            previous: previous.target(),
                            current,
                        });
                    }
                    let warning = InitWarning::RouteCollision {
                        path,
                        previous: previous.target(),
                        current,
                    };
                    warn!("{}", warning);
                    report.warn(warning);
                }
            }
        }

        info!("路由表构建完成，共 {} 条路由", table.len());
        Ok(table)
    }
}
