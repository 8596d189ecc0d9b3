//! 应用启动器
//!
//! 按固定顺序执行初始化阶段，任一阶段失败都会中止启动，不产生部分初始化的上下文。

use crate::config_sources::ApplicationSettings;
use crate::infrastructure::ApplicationContext;
use di_abstractions::{
    ComponentRegistry, ContainerConfig, ContainerStats, DependencyInjector, InitReport, RouteBuilder, Strictness,
    TypeCatalog,
};
use di_impl::{ComponentRegistrar, ControllerRouteBuilder, FieldInjector, GlobalTypeCatalog};
use tracing::{error, info, warn};
use xmvc_common::InfrastructureError;

/// 应用启动器
pub struct ApplicationBootstrapper {
    /// 应用配置
    settings: ApplicationSettings,
    /// 类型目录
    catalog: Box<dyn TypeCatalog>,
}

impl ApplicationBootstrapper {
    /// 使用全局类型目录创建启动器
    pub fn new(settings: ApplicationSettings) -> Self {
        Self {
            settings,
            catalog: Box::new(GlobalTypeCatalog::new()),
        }
    }

    /// 替换类型目录
    pub fn with_catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// 替换类型目录（已装箱）
    pub fn with_boxed_catalog(mut self, catalog: Box<dyn TypeCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            strictness: if self.settings.strict {
                Strictness::Strict
            } else {
                Strictness::Permissive
            },
        }
    }

    /// 启动应用
    pub fn bootstrap(self) -> Result<ApplicationContext, InfrastructureError> {
        info!(
            "开始初始化应用: scan_package={}, catalog={}",
            self.settings.scan_package,
            self.catalog.name()
        );

        let config = self.container_config();
        let mut report = InitReport::new();

        let descriptors = self
            .catalog
            .scan(&self.settings.scan_package)
            .map_err(|e| fail("扫描", e))?;

        let container = ComponentRegistrar::new(config.clone())
            .register_all(descriptors, &mut report)
            .map_err(|e| fail("注册", e))?;

        let summary = FieldInjector::new(config.clone())
            .inject_all(&container, &mut report)
            .map_err(|e| fail("注入", e))?;

        let routes = ControllerRouteBuilder::new(config)
            .build(&container, &mut report)
            .map_err(|e| fail("路由", e))?;

        let stats = ContainerStats {
            registered_names: container.len(),
            distinct_instances: container.distinct_instances(),
            injected_points: summary.injected,
            unresolved_injections: summary.unresolved,
            routes: routes.len(),
        };

        if !report.is_clean() {
            warn!("初始化完成，但有 {} 条警告", report.warnings().len());
        }
        info!(
            "应用初始化完成: {} 个名称, {} 个实例, {} 条路由",
            stats.registered_names, stats.distinct_instances, stats.routes
        );

        Ok(ApplicationContext::new(self.settings, container, routes, report, stats))
    }
}

fn fail<E>(phase: &str, err: E) -> InfrastructureError
where
    E: Into<InfrastructureError> + std::fmt::Display,
{
    error!("初始化阶段失败 [{}]: {}", phase, err);
    err.into()
}
