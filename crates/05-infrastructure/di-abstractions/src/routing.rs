//! 路由表抽象

use crate::container::InitReport;
use crate::registry::ComponentRegistry;
use std::collections::BTreeMap;
use xmvc_common::{HandlerDescriptor, RouteError};

/// 路由条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// 规范化后的路径
    pub path: String,
    /// 所属组件的注册名称
    pub bean_name: String,
    /// 处理器描述
    pub handler: HandlerDescriptor,
}

impl RouteEntry {
    /// 目标的可读描述 `bean::handler`
    pub fn target(&self) -> String {
        format!("{}::{}", self.bean_name, self.handler.name)
    }
}

/// 路由表：规范化路径 → 路由条目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteEntry>,
}

impl RouteTable {
    /// 创建空路由表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入条目，返回被覆盖的旧条目
    pub fn insert(&mut self, entry: RouteEntry) -> Option<RouteEntry> {
        self.routes.insert(entry.path.clone(), entry)
    }

    /// 按规范化路径查找
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.get(path)
    }

    /// 路由数量
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 所有条目（按路径排序）
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.values()
    }

    /// 所有路径（按路径排序）
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

/// 路由表构建器 trait
pub trait RouteBuilder: Send + Sync {
    /// 从注册表中的控制器构建路由表
    fn build(
        &self,
        registry: &dyn ComponentRegistry,
        report: &mut InitReport,
    ) -> Result<RouteTable, RouteError>;
}
