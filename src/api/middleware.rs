//! API middleware
//!
//! Shared application state, the JSON error envelope and the anonymous
//! session cookie used to key the comment form cache.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::db::repositories::{PropertyRepository, RegionRepository};
use crate::services::{ArticleService, CommentService, PropertySearchService};

/// Name of the anonymous session cookie
pub const SESSION_COOKIE: &str = "villarent_session";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub property_search: Arc<PropertySearchService>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub article_service: Arc<ArticleService>,
    pub comment_service: Arc<CommentService>,
    pub region_repo: Arc<dyn RegionRepository>,
    pub site: Arc<SiteConfig>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!("Request failed: {:#}", e);
        Self::internal_error("Internal server error")
    }
}

/// Extract the anonymous session id from the request cookies
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(rest) = cookie.strip_prefix(SESSION_COOKIE) {
            if let Some(value) = rest.strip_prefix('=') {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Mint a fresh anonymous session id
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Set-Cookie value for a freshly minted session id
pub fn session_cookie_value(session_id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_session_id() {
        let headers = headers_with_cookie("villarent_session=abc-123");
        assert_eq!(extract_session_id(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn test_extract_session_id_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; villarent_session=abc; lang=en");
        assert_eq!(extract_session_id(&headers), Some("abc".to_string()));
    }

    #[test]
    fn test_extract_session_id_missing_or_empty() {
        assert!(extract_session_id(&HeaderMap::new()).is_none());
        assert!(extract_session_id(&headers_with_cookie("villarent_session=")).is_none());
        assert!(extract_session_id(&headers_with_cookie("other=1")).is_none());
    }

    #[test]
    fn test_new_session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[test]
    fn test_api_error_codes() {
        assert_eq!(ApiError::not_found("gone").error.code, "NOT_FOUND");
        assert_eq!(ApiError::validation_error("bad").error.code, "VALIDATION_ERROR");
    }
}
