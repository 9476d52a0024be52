//! Data models
//!
//! This module contains all data structures used throughout Villarent.
//! Models represent:
//! - Database entities (Property, Region, Article, ArticleCategory, Comment)
//! - Query filter bags and paging types
//! - Internal data transfer objects

mod article;
mod category;
mod comment;
mod property;
mod region;

pub use article::{ArchiveMonth, Article, ArticleFilter, ListParams, PagedResult};
pub use category::ArticleCategory;
pub use comment::{Comment, CommentRecipient, CreateCommentInput};
pub use property::{Property, PropertyFilter, StayWindow};
pub use region::Region;
