use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::ContentPayload;

/// 校验评论/回答内容，并生成请求体
///
/// Blank drafts are rejected before anything is sent; the text itself is sent
/// exactly as typed.
pub fn validate_content(draft: &str) -> Result<ContentPayload> {
    if draft.trim().is_empty() {
        return Err(AppError::Validation("Text cannot be empty".to_string()));
    }

    let payload = ContentPayload::new(draft);
    payload.validate()?;
    Ok(payload)
}
