use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    config::PageContext,
    error::{AppError, ErrorPayload, Result},
    models::{Answer, Comment, ContentPayload, Profile, Question},
};

const CSRF_HEADER: &str = "X-CSRFToken";

/// One call per backend action of the Q&A REST API.
///
/// Each call succeeds only on its expected status; anything else rejects with
/// [`AppError::Status`] carrying the server's body. Nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QaApi: Send + Sync {
    async fn get_question(&self, question_id: &str) -> Result<Question>;

    async fn get_profile(&self, account_id: &str) -> Result<Profile>;

    /// `POST {target_url}like_it/`
    async fn like(&self, target_url: &str) -> Result<()>;

    /// `DELETE {target_url}dislike_it/`
    async fn dislike(&self, target_url: &str) -> Result<()>;

    async fn post_comment(&self, target_url: &str, payload: ContentPayload) -> Result<Comment>;

    async fn delete_comment(&self, comment_id: i64) -> Result<()>;

    async fn post_answer(&self, question_id: i64, payload: ContentPayload) -> Result<Answer>;

    async fn mark_solution(&self, question_id: i64, answer_id: i64) -> Result<()>;

    async fn remove_solution_mark(&self, question_id: i64, answer_id: i64) -> Result<()>;
}

/// API handle shared by every mounted component.
pub type SharedApi = Arc<dyn QaApi>;

#[derive(Clone)]
pub struct ApiClient {
    context: Arc<PageContext>,
    http_client: Client,
}

impl ApiClient {
    pub fn new(context: Arc<PageContext>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            context,
            http_client,
        })
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Attaches the anti-forgery header; empty when the page carried no token.
    fn protected(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.context.csrf_token.as_deref().unwrap_or_default();
        request.header(CSRF_HEADER, token)
    }

    /// Sends the request and returns the response body when the status matches.
    async fn send(&self, request: RequestBuilder, expected: StatusCode) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            AppError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status != expected {
            warn!("Unexpected status {} (expected {})", status, expected);
            return Err(AppError::Status {
                status: status.as_u16(),
                expected: expected.as_u16(),
                payload: ErrorPayload::from_body(&body),
            });
        }

        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<T> {
        let body = self.send(request, expected).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl QaApi for ApiClient {
    async fn get_question(&self, question_id: &str) -> Result<Question> {
        let url = self.context.question_detail_url(question_id);
        debug!("Fetching question: {}", url);

        self.send_json(self.http_client.get(&url), StatusCode::OK).await
    }

    async fn get_profile(&self, account_id: &str) -> Result<Profile> {
        let url = self.context.profile_data_url(account_id);
        debug!("Fetching profile: {}", url);

        self.send_json(self.http_client.get(&url), StatusCode::OK).await
    }

    async fn like(&self, target_url: &str) -> Result<()> {
        let url = format!("{}like_it/", target_url);
        debug!("Liking: {}", url);

        let request = self.protected(self.http_client.post(&url)).json(&json!({}));
        self.send(request, StatusCode::CREATED).await.map(|_| ())
    }

    async fn dislike(&self, target_url: &str) -> Result<()> {
        let url = format!("{}dislike_it/", target_url);
        debug!("Disliking: {}", url);

        let request = self
            .protected(self.http_client.delete(&url))
            .header(CONTENT_TYPE, "application/json");
        self.send(request, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    async fn post_comment(&self, target_url: &str, payload: ContentPayload) -> Result<Comment> {
        debug!("Posting comment to: {}", target_url);

        let request = self.protected(self.http_client.post(target_url)).json(&payload);
        self.send_json(request, StatusCode::CREATED).await
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let url = self.context.comment_url(comment_id);
        debug!("Deleting comment: {}", url);

        let request = self.protected(self.http_client.delete(&url));
        self.send(request, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    async fn post_answer(&self, question_id: i64, payload: ContentPayload) -> Result<Answer> {
        let url = self.context.answers_url(question_id);
        debug!("Posting answer to: {}", url);

        let request = self.protected(self.http_client.post(&url)).json(&payload);
        self.send_json(request, StatusCode::CREATED).await
    }

    async fn mark_solution(&self, question_id: i64, answer_id: i64) -> Result<()> {
        let url = self.context.mark_solution_url(question_id, answer_id);
        debug!("Marking solution: {}", url);

        let request = self.protected(self.http_client.patch(&url));
        self.send(request, StatusCode::OK).await.map(|_| ())
    }

    async fn remove_solution_mark(&self, question_id: i64, answer_id: i64) -> Result<()> {
        let url = self.context.remove_solution_mark_url(question_id, answer_id);
        debug!("Removing solution mark: {}", url);

        let request = self.protected(self.http_client.patch(&url));
        self.send(request, StatusCode::OK).await.map(|_| ())
    }
}
