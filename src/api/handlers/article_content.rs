use crate::core::error::parse_article_url;
use crate::tools::extract_article_content;
use crate::types::*;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::warn;

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Rejected article-content request: {}", error);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// `GET /article-content?url=...`
///
/// A bad or missing `url` is the only 4xx; everything past validation answers 200.
pub async fn article_content_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ArticleContentQuery>, QueryRejection>,
) -> Result<Json<ArticleContentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Query(query) = query.map_err(|rejection| bad_request(rejection.body_text()))?;
    let url = parse_article_url(query.url.as_deref()).map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(extract_article_content(&state, &url).await))
}
