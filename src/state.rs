use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::{Config, PageContext},
    error::Result,
    services::{ApiClient, StaticDocument},
};

/// 应用程序的共享状态
/// 启动时构建一次，之后传入控件树
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 页面上下文（基础URL、CSRF令牌、资源ID）
    pub context: Arc<PageContext>,

    /// REST API 客户端
    pub api: Arc<ApiClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let context = Arc::new(PageContext::from_config(&config)?);
        let api = ApiClient::new(
            Arc::clone(&context),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            config,
            context,
            api: Arc::new(api),
        })
    }

    /// 当前页面包含的挂载点
    pub fn document(&self) -> StaticDocument {
        StaticDocument::new(self.config.mount_points.iter().cloned())
    }
}
