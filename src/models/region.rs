//! Region model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic region grouping properties and articles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier
    pub id: i64,
    /// Region title
    pub title: String,
    /// Rich-text description (stored HTML)
    pub description: String,
    /// Region photo path
    pub photo: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Region {
    /// Link to the region show view.
    pub fn link(&self) -> String {
        format!("/regions/{}", self.id)
    }

    /// Link to the article listing scoped to this region.
    pub fn articles_link(&self) -> String {
        format!("/articles/region/{}", self.id)
    }
}
