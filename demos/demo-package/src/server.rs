//! axum 宿主适配
//!
//! 所有路径都交给 fallback 处理器，由容器的路由表决定结果。

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use di_abstractions::SERVER_ERROR_PREFIX;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use xmvc_common::{SimpleRequest, TextResponse};
use xmvc_composition::ApplicationContext;

/// 创建路由
pub fn create_router(context: Arc<ApplicationContext>) -> Router {
    Router::new().fallback(dispatch).with_state(context)
}

/// 启动 HTTP 服务，直到收到退出信号
pub async fn serve(context: Arc<ApplicationContext>) -> anyhow::Result<()> {
    let bind_address = context.settings().server.bind.clone();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("HTTP 服务已启动: {}", bind_address);

    axum::serve(listener, create_router(context))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("监听退出信号失败: {}", e);
            }
            info!("收到退出信号，正在关闭服务");
        })
        .await?;
    Ok(())
}

/// 把 HTTP 请求适配为容器请求并同步分发
async fn dispatch(State(context): State<Arc<ApplicationContext>>, uri: Uri) -> impl IntoResponse {
    let target = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let dispatched = tokio::task::spawn_blocking(move || {
        let request = SimpleRequest::from_uri(&target)
            .with_context_path(context.settings().context_path.clone());
        let mut response = TextResponse::new();
        let outcome = context.dispatch(&request, &mut response);
        (outcome, response.into_body())
    })
    .await;

    let (status, body) = match dispatched {
        Ok((outcome, body)) => (
            StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        ),
        Err(e) => {
            error!("分发任务异常: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}{}", SERVER_ERROR_PREFIX, e),
            )
        }
    };

    (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
