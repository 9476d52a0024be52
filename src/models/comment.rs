//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader comment on an article.
///
/// Comments are created only through the public comment form and are never
/// edited or deleted by readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: i64,
    /// Article the comment belongs to
    pub article_id: i64,
    /// Commenter display name
    pub name: String,
    /// Commenter email, used for reply notification
    pub email: String,
    /// Comment text
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentInput {
    /// Target article
    pub article_id: i64,
    /// Commenter display name
    pub name: String,
    /// Commenter email
    pub email: String,
    /// Comment text
    pub content: String,
}

/// One distinct recipient of the reply notification fan-out:
/// an email paired with the most recently used name for that email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRecipient {
    pub email: String,
    pub name: String,
}
