use serde::{Deserialize, Serialize};

use crate::models::account::Account;
use crate::utils::cache::Identified;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: Account,
    /// Set when the current viewer wrote the comment and may delete it.
    #[serde(default)]
    pub my: bool,
}

impl Identified for Comment {
    fn id(&self) -> i64 {
        self.id
    }
}
