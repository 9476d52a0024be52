//! Service layer
//!
//! Business logic sitting between the HTTP handlers and the repositories:
//! property search resolution, article browsing and the archive bucketizer,
//! comment moderation and notification, the session form cache, and the
//! SMTP mailer.

pub mod article;
pub mod comment;
pub mod form_cache;
pub mod mailer;
pub mod property;

pub use article::ArticleService;
pub use comment::{CommentService, SubmissionOutcome};
pub use form_cache::FormCache;
pub use mailer::Mailer;
pub use property::{PropertySearchRequest, PropertySearchService, SEARCH_PAGE_LENGTH};
