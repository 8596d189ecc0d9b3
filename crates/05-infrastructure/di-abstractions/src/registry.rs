//! 组件注册表抽象接口

use std::sync::Arc;
use xmvc_common::{Bean, TypeDescriptor};

/// 组件注册信息
///
/// 同一实例在多个名称下注册时，每个名称各有一条注册信息，共享同一个 [`Bean`]。
#[derive(Debug, Clone)]
pub struct ComponentRegistration {
    /// 注册名称
    pub name: String,
    /// 组件实例
    pub bean: Bean,
    /// 组件类型描述符
    pub descriptor: Arc<TypeDescriptor>,
}

/// 组件注册表 trait
///
/// 初始化完成后只读。
pub trait ComponentRegistry: Send + Sync {
    /// 按注册名称查找
    fn get(&self, name: &str) -> Option<&ComponentRegistration>;

    /// 所有注册信息（按名称排序）
    fn registrations(&self) -> Vec<&ComponentRegistration>;

    /// 已注册名称数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否存在指定名称
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 按名称解析为指定类型的视图
    fn resolve<T: ?Sized + 'static>(&self, name: &str) -> Option<Arc<T>>
    where
        Self: Sized,
    {
        self.get(name).and_then(|registration| registration.bean.view::<T>())
    }
}
