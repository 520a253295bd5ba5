use serde::{Deserialize, Serialize};

use crate::models::account::Account;
use crate::models::comment::Comment;
use crate::utils::cache::Identified;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub content: String,
    pub author: Account,
    #[serde(default)]
    pub solution: bool,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub already_liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Identified for Answer {
    fn id(&self) -> i64 {
        self.id
    }
}
