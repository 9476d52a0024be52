//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the queries for a specific entity.

pub mod article;
pub mod category;
pub mod comment;
pub mod property;
pub mod region;

pub use article::{ArticleRepository, SqlxArticleRepository};
pub use category::{CategoryRepository, SqlxCategoryRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use property::{PropertyRepository, SqlxPropertyRepository};
pub use region::{RegionRepository, SqlxRegionRepository};
