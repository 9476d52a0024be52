//! Article category model

use serde::{Deserialize, Serialize};

/// A tag-like category articles can belong to (many-to-many)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCategory {
    /// Unique identifier
    pub id: i64,
    /// Category title
    pub title: String,
}

impl ArticleCategory {
    /// Link to the article listing scoped to this category.
    pub fn link(&self) -> String {
        format!("/articles/category/{}", self.id)
    }
}
