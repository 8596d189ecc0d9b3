//! 应用上下文
//!
//! 初始化完成后的只读运行时：容器、路由表和分发器。

use crate::builder::ApplicationBuilder;
use crate::config_sources::ApplicationSettings;
use chrono::{DateTime, Utc};
use di_abstractions::{
    ComponentRegistry, ContainerStats, DispatchOutcome, InitReport, RequestDispatcher, RouteTable,
};
use di_impl::{Container, Dispatcher};
use std::sync::Arc;
use xmvc_common::{Request, Response};

/// 应用上下文
///
/// 通过 `Arc` 在宿主的工作线程间共享。
#[derive(Debug)]
pub struct ApplicationContext {
    settings: ApplicationSettings,
    container: Arc<Container>,
    routes: Arc<RouteTable>,
    dispatcher: Dispatcher,
    report: InitReport,
    stats: ContainerStats,
    started_at: DateTime<Utc>,
}

impl ApplicationContext {
    /// 创建应用构建器
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub(crate) fn new(
        settings: ApplicationSettings,
        container: Container,
        routes: RouteTable,
        report: InitReport,
        stats: ContainerStats,
    ) -> Self {
        let container = Arc::new(container);
        let routes = Arc::new(routes);
        let registry: Arc<dyn ComponentRegistry> = container.clone();
        let dispatcher = Dispatcher::new(registry, Arc::clone(&routes));

        Self {
            settings,
            container,
            routes,
            dispatcher,
            report,
            stats,
            started_at: Utc::now(),
        }
    }

    /// 应用配置
    pub fn settings(&self) -> &ApplicationSettings {
        &self.settings
    }

    /// 组件容器
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// 路由表
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// 请求分发器
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// 初始化报告
    pub fn report(&self) -> &InitReport {
        &self.report
    }

    /// 容器统计信息
    pub fn stats(&self) -> &ContainerStats {
        &self.stats
    }

    /// 初始化完成时间
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 按注册名称解析组件视图
    pub fn resolve<T: ?Sized + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.container.resolve::<T>(name)
    }

    /// 分发单个请求
    pub fn dispatch(&self, request: &dyn Request, response: &mut dyn Response) -> DispatchOutcome {
        self.dispatcher.dispatch(request, response)
    }
}
