//! 容器配置与初始化报告

use std::fmt;

/// 初始化严格程度
///
/// 宽松模式下，未解析的注入点和名称/路由冲突只记录警告；
/// 严格模式下它们会中止初始化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// 记录并继续（默认）
    #[default]
    Permissive,
    /// 视为初始化失败
    Strict,
}

impl Strictness {
    /// 是否为严格模式
    pub fn is_strict(self) -> bool {
        self == Strictness::Strict
    }
}

/// 容器配置
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// 严格程度
    pub strictness: Strictness,
}

impl ContainerConfig {
    /// 严格模式配置
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}

/// 初始化警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitWarning {
    /// 注入点的目标名称在容器中不存在，字段保持未注入
    UnresolvedInjection {
        owner: String,
        field: String,
        target: String,
    },
    /// 同名组件被后注册者覆盖
    NameCollision {
        name: String,
        previous: String,
        current: String,
    },
    /// 同一路径的处理器被后处理者覆盖
    RouteCollision {
        path: String,
        previous: String,
        current: String,
    },
}

impl fmt::Display for InitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitWarning::UnresolvedInjection { owner, field, target } => {
                write!(f, "未解析的注入点: {}.{} -> {}", owner, field, target)
            }
            InitWarning::NameCollision { name, previous, current } => {
                write!(f, "组件名称冲突: {} ({} 被 {} 覆盖)", name, previous, current)
            }
            InitWarning::RouteCollision { path, previous, current } => {
                write!(f, "路由冲突: {} ({} 被 {} 覆盖)", path, previous, current)
            }
        }
    }
}

/// 初始化报告
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    warnings: Vec<InitWarning>,
}

impl InitReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录警告
    pub fn warn(&mut self, warning: InitWarning) {
        self.warnings.push(warning);
    }

    /// 全部警告
    pub fn warnings(&self) -> &[InitWarning] {
        &self.warnings
    }

    /// 未解析的注入点
    pub fn unresolved_injections(&self) -> impl Iterator<Item = &InitWarning> {
        self.warnings
            .iter()
            .filter(|warning| matches!(warning, InitWarning::UnresolvedInjection { .. }))
    }

    /// 是否没有警告
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册名称数量
    pub registered_names: usize,
    /// 不同实例数量
    pub distinct_instances: usize,
    /// 已注入的注入点数量
    pub injected_points: usize,
    /// 未解析的注入点数量
    pub unresolved_injections: usize,
    /// 路由数量
    pub routes: usize,
}
