use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::error::{AppError, Result};

/// Host that is served by the local development API on a separate port.
const DEV_HOST: &str = "127.0.0.1";
const CSRF_COOKIE: &str = "csrftoken";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub log_level: String,

    // Page configuration
    pub page_url: String,
    pub cookie: String,
    pub mount_points: Vec<String>,

    // API configuration
    pub dev_api_port: u16,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "tost_ui=debug".to_string()),

            page_url: env::var("PAGE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/questions/1/".to_string()),
            cookie: env::var("COOKIE").unwrap_or_default(),
            mount_points: env::var("MOUNT_POINTS")
                .unwrap_or_else(|_| "question-app-container".to_string())
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),

            dev_api_port: env::var("DEV_API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }

    /// 生产环境输出JSON格式日志
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Everything the controls need to know about the page they run on.
///
/// Resolved once at startup from the page location and its cookies, then
/// shared read-only by the API client and every control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub base_url: String,
    pub csrf_token: Option<String>,
    /// Last path segment of the page: a question id on detail pages, an account id on profiles.
    pub resource_id: String,
}

impl PageContext {
    pub fn resolve(page_url: &str, cookie_header: &str, dev_api_port: u16) -> Result<Self> {
        let url = Url::parse(page_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| AppError::config("page URL has no host"))?;

        let base_url = if host == DEV_HOST {
            format!("http://{}:{}", DEV_HOST, dev_api_port)
        } else {
            match url.port() {
                Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
                None => format!("{}://{}", url.scheme(), host),
            }
        };

        let resource_id = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .ok_or_else(|| AppError::config("page URL has no resource id"))?;

        Ok(Self {
            base_url,
            csrf_token: read_cookie(cookie_header, CSRF_COOKIE),
            resource_id,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::resolve(&config.page_url, &config.cookie, config.dev_api_port)
    }

    pub fn question_url(&self, question_id: i64) -> String {
        format!("{}/questions/{}/", self.base_url, question_id)
    }

    pub fn question_comment_url(&self, question_id: i64) -> String {
        format!("{}comment_it/", self.question_url(question_id))
    }

    pub fn answers_url(&self, question_id: i64) -> String {
        format!("{}answers/", self.question_url(question_id))
    }

    pub fn answer_url(&self, question_id: i64, answer_id: i64) -> String {
        format!("{}{}/", self.answers_url(question_id), answer_id)
    }

    pub fn answer_comment_url(&self, question_id: i64, answer_id: i64) -> String {
        format!("{}comment_it/", self.answer_url(question_id, answer_id))
    }

    pub fn mark_solution_url(&self, question_id: i64, answer_id: i64) -> String {
        format!("{}mark_as_solution/", self.answer_url(question_id, answer_id))
    }

    pub fn remove_solution_mark_url(&self, question_id: i64, answer_id: i64) -> String {
        format!("{}remove_solution_mark/", self.answer_url(question_id, answer_id))
    }

    pub fn comment_url(&self, comment_id: i64) -> String {
        format!("{}/comments/{}/", self.base_url, comment_id)
    }

    pub fn question_detail_url(&self, question_id: &str) -> String {
        format!("{}/questions/{}/", self.base_url, question_id)
    }

    pub fn profile_data_url(&self, account_id: &str) -> String {
        format!("{}/account/accounts/{}/", self.base_url, account_id)
    }

    /// Public profile page of an account.
    pub fn account_link(&self, account_id: i64) -> String {
        format!("{}/account/{}/", self.base_url, account_id)
    }

    /// Public question page, as linked from profile cards.
    pub fn question_link(&self, question_id: i64) -> String {
        format!("{}/{}/", self.base_url, question_id)
    }
}

fn read_cookie(header: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}
