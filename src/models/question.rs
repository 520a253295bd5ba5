use serde::{Deserialize, Serialize};

use crate::models::account::Account;
use crate::models::answer::Answer;
use crate::models::comment::Comment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    pub author: Account,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub already_liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Set when the current viewer asked the question.
    #[serde(default)]
    pub my: bool,
}

impl Question {
    /// Question id handed to answers so they can offer solution marking.
    /// `None` unless the viewer owns the question.
    pub fn owner_question_id(&self) -> Option<i64> {
        Some(self.id).filter(|id| self.my && *id != 0)
    }
}
