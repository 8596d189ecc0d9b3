//! # xmvc 演示宿主
//!
//! 扫描本 crate 中的控制器和服务，并通过 axum 对外提供 HTTP 服务。
//!
//! ```text
//! cargo run -p xmvc-demo -- --config demos/demo-package/config/app.toml
//! curl 'http://127.0.0.1:8080/user/query?name=alice&age=30'
//! ```

mod controller;
mod server;
mod service;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use xmvc_composition::ApplicationContext;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "xmvc-demo")]
#[command(about = "xmvc 演示宿主")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖扫描命名空间
    #[arg(long)]
    scan_package: Option<String>,

    /// 覆盖监听地址
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut builder = ApplicationContext::builder().with_logging(true);
    if let Some(config) = &args.config {
        builder = builder.with_config_file(config);
    }
    if let Some(scan_package) = &args.scan_package {
        builder = builder.with_override("scan_package", scan_package.as_str());
    }
    if let Some(bind) = &args.bind {
        builder = builder.with_override("server.bind", bind.as_str());
    }

    let context = Arc::new(builder.build()?);
    info!(
        "应用已就绪: {} 条路由, 启动于 {}",
        context.stats().routes,
        context.started_at()
    );
    for entry in context.routes().entries() {
        info!("  {} -> {}", entry.path, entry.target());
    }

    server::serve(context).await
}
