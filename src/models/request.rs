use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the comment and answer creation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContentPayload {
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

impl ContentPayload {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
