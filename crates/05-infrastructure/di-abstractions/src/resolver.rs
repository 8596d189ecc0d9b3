//! 依赖注入器抽象接口
//!
//! 注入在全部实例创建完成之后执行，因此组件之间可以任意方向（包括循环）相互引用。

use crate::container::InitReport;
use crate::registry::ComponentRegistry;
use xmvc_common::DependencyError;

/// 依赖注入器 trait
pub trait DependencyInjector: Send + Sync {
    /// 对注册表中每个实例的每个注入点执行注入
    fn inject_all(
        &self,
        registry: &dyn ComponentRegistry,
        report: &mut InitReport,
    ) -> Result<InjectionSummary, DependencyError>;
}

/// 注入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionSummary {
    /// 已注入的注入点数量
    pub injected: usize,
    /// 未解析的注入点数量
    pub unresolved: usize,
}
