//! Comment submission
//!
//! Moderation and notification for the public comment form. A submission
//! is first cached in the session form cache, then checked against the
//! article's existing comments for an exact duplicate, then the reply
//! notification fan-out runs over the commenters that existed before the
//! insert, and only then is the comment persisted.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::models::{Comment, CreateCommentInput};
use crate::services::{FormCache, Mailer};

/// Name under which the comment form caches its submitted data
pub const COMMENT_FORM_NAME: &str = "comment-form";

/// Duplicates at or below this length are allowed to recur
const DUPLICATE_LENGTH_THRESHOLD: usize = 20;

const REJECTED_MESSAGE: &str = "That comment already exists! Spammer!";
const ACCEPTED_MESSAGE: &str = "Thanks for your comment";

/// Result of a comment submission
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The comment was persisted
    Accepted { comment: Comment, message: String },
    /// The comment was refused with a form-level message
    Rejected { message: String },
    /// The target article does not exist
    ArticleNotFound,
}

/// Comment moderation and notification service
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    articles: Arc<dyn ArticleRepository>,
    mailer: Option<Arc<Mailer>>,
    form_cache: Arc<FormCache>,
    base_url: String,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        articles: Arc<dyn ArticleRepository>,
        mailer: Option<Arc<Mailer>>,
        form_cache: Arc<FormCache>,
        base_url: String,
    ) -> Self {
        Self {
            comments,
            articles,
            mailer,
            form_cache,
            base_url,
        }
    }

    /// Handle a comment form submission for the given session.
    pub async fn submit(
        &self,
        session_id: &str,
        input: CreateCommentInput,
    ) -> Result<SubmissionOutcome> {
        // Cache the raw form data first so a rejection can repopulate the form
        self.form_cache
            .store(
                session_id,
                COMMENT_FORM_NAME,
                json!({
                    "Name": input.name,
                    "Email": input.email,
                    "Comment": input.content,
                }),
            )
            .await;

        let Some(article) = self.articles.get_by_id(input.article_id).await? else {
            return Ok(SubmissionOutcome::ArticleNotFound);
        };

        if input.content.len() > DUPLICATE_LENGTH_THRESHOLD
            && self
                .comments
                .duplicate_exists(input.article_id, &input.content)
                .await?
        {
            return Ok(SubmissionOutcome::Rejected {
                message: REJECTED_MESSAGE.to_string(),
            });
        }

        // Fan-out runs over the commenters that exist before the insert
        self.notify_commenters(input.article_id, &article.title, &article.slug)
            .await?;

        let comment = self.comments.create(input).await?;
        self.form_cache.clear(session_id, COMMENT_FORM_NAME).await;

        Ok(SubmissionOutcome::Accepted {
            comment,
            message: ACCEPTED_MESSAGE.to_string(),
        })
    }

    /// Cached form data for the caller's session, if a prior submission
    /// was rejected.
    pub async fn cached_form(&self, session_id: &str) -> Option<serde_json::Value> {
        self.form_cache.get(session_id, COMMENT_FORM_NAME).await
    }

    /// Comments on an article, oldest first.
    pub async fn list_for_article(&self, article_id: i64) -> Result<Option<Vec<Comment>>> {
        if self.articles.get_by_id(article_id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.comments.list_by_article(article_id).await?))
    }

    /// Email every distinct prior commenter on the article, but only when
    /// the conversation already has more than one participant.
    async fn notify_commenters(
        &self,
        article_id: i64,
        article_title: &str,
        article_slug: &str,
    ) -> Result<()> {
        let Some(mailer) = &self.mailer else {
            return Ok(());
        };

        let recipients = self.comments.distinct_recipients(article_id).await?;
        if recipients.len() <= 1 {
            return Ok(());
        }

        let link = format!("{}/articles/{}", self.base_url, article_slug);
        for recipient in &recipients {
            if let Err(e) = mailer
                .send_comment_reply(recipient, article_title, &link)
                .await
            {
                tracing::warn!(
                    email = %recipient.email,
                    error = %e,
                    "Failed to send comment reply notification"
                );
            }
        }

        Ok(())
    }
}
