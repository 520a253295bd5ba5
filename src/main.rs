use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tost_ui::{
    services::{bootstrap, SharedApi},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化日志：生产环境输出JSON，开发环境输出可读格式
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(EnvFilter::new(config.log_level.clone()))
        .with(production.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!production).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    info!("Starting Tost UI for {} ({})", config.page_url, config.environment);

    let state = AppState::new(config)?;
    info!(
        "Resolved API base {} (resource {})",
        state.context.base_url, state.context.resource_id
    );
    if state.context.csrf_token.is_none() {
        warn!("No csrftoken cookie; mutating requests will be rejected");
    }

    // 检测挂载点并挂载控件
    let document = state.document();
    let mounted = bootstrap(&state.context, state.api.as_ref(), &document).await;
    let count = mounted.len();

    let api: SharedApi = state.api.clone();
    for control in mounted {
        let element_id = control.mount_point().element_id();
        let html = control.render(Arc::clone(&state.context), Arc::clone(&api));
        println!("<div id=\"{}\">{}</div>", element_id, html);
    }

    info!("Mounted {} control(s)", count);
    Ok(())
}
