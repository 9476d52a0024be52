//! Comment API endpoints

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::middleware::{
    extract_session_id, new_session_id, session_cookie_value, ApiError, AppState,
};
use crate::api::responses::CommentResponse;
use crate::models::CreateCommentInput;
use crate::services::SubmissionOutcome;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub article_id: i64,
    pub name: String,
    pub email: String,
    pub comment: String,
}

/// Submit a comment on an article.
///
/// Callers without a session cookie get one minted so the form cache can
/// key their submission; the rejection paths report through the
/// `status`/`message` body, not an HTTP failure.
pub async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Response, ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.comment.trim().is_empty() {
        return Err(ApiError::validation_error("Name, email and comment are required"));
    }

    let (session_id, minted) = match extract_session_id(&headers) {
        Some(id) => (id, false),
        None => (new_session_id(), true),
    };

    let input = CreateCommentInput {
        article_id: req.article_id,
        name: req.name,
        email: req.email,
        content: req.comment,
    };

    let body = match state.comment_service.submit(&session_id, input).await? {
        SubmissionOutcome::Accepted { comment, message } => json!({
            "status": "good",
            "message": message,
            "comment": CommentResponse::from(comment),
        }),
        SubmissionOutcome::Rejected { message } => json!({
            "status": "bad",
            "message": message,
        }),
        SubmissionOutcome::ArticleNotFound => {
            return Err(ApiError::not_found("Article not found"));
        }
    };

    let mut response = Json(body).into_response();
    if minted {
        if let Ok(value) = session_cookie_value(&session_id).parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    Ok(response)
}

/// Comments on an article, oldest first
pub async fn get_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(comments) = state.comment_service.list_for_article(article_id).await? else {
        return Err(ApiError::not_found("Article not found"));
    };

    let comments: Vec<CommentResponse> =
        comments.into_iter().map(CommentResponse::from).collect();
    Ok(Json(json!({ "comments": comments })))
}

/// The caller's cached comment form data, if their last submission was
/// rejected
pub async fn get_comment_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let form = match extract_session_id(&headers) {
        Some(session_id) => state.comment_service.cached_form(&session_id).await,
        None => None,
    };

    Json(json!({ "form": form }))
}
