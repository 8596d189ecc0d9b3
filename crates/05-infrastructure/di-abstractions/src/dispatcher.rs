//! 请求分发器抽象接口

use xmvc_common::{Request, Response};

/// 路由未命中时的响应体
pub const NOT_FOUND_BODY: &str = "404 Not Found!";

/// 分发失败时响应体的前缀，后接诊断信息
pub const SERVER_ERROR_PREFIX: &str = "500 Exception Detail:\n";

/// 单个请求的分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 处理器正常完成
    Completed,
    /// 路由未命中，已写入 [`NOT_FOUND_BODY`]
    NotFound,
    /// 参数绑定或处理器执行失败，已写入错误响应体
    Failed,
}

impl DispatchOutcome {
    /// 对应的 HTTP 状态码
    pub fn status_code(self) -> u16 {
        match self {
            DispatchOutcome::Completed => 200,
            DispatchOutcome::NotFound => 404,
            DispatchOutcome::Failed => 500,
        }
    }
}

/// 请求分发器 trait
///
/// 可被宿主并发调用；分发过程不修改容器和路由表。
pub trait RequestDispatcher: Send + Sync {
    /// 分发单个请求，失败不会向宿主传播
    fn dispatch(&self, request: &dyn Request, response: &mut dyn Response) -> DispatchOutcome;
}
