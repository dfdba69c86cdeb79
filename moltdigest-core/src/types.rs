use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub submolt: Option<String>,
    pub created_at: Option<String>,
}

impl Post {
    /// External link, treating an empty string the same as absent.
    pub fn external_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPost {
    pub score: u32,
    pub post: Post,
}
