use serde::{Deserialize, Serialize};

/// Dataset behind the profile page tabs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub own_questions: Vec<QuestionSummary>,
    #[serde(default)]
    pub own_answers: Vec<AnswerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: i64,
    pub summary: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub answers_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub likes_count: i64,
}

/// Answer card; the server truncates `content` to its first 50 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub answers_count: i64,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub solution: bool,
}
