//! HTTP handlers for `/bookmarks`.

use anyhow::Context;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use super::store::{BookmarkStore, Deletion};
use super::validate::{BookmarkCandidate, validate_create};
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::Bookmark;

/// Ids that are not integers cannot name a row, so they share the 404.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| {
        tracing::error!("no bookmark found with id {}", raw);
        ApiError::NotFound
    })
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = BookmarkStore::new(state.db.connection());
    let bookmarks = store.list_all().await.context("failed to list bookmarks")?;

    let bookmarks: Vec<Bookmark> = bookmarks.into_iter().map(Bookmark::sanitized).collect();
    Ok((StatusCode::OK, Json(bookmarks)).into_response())
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let store = BookmarkStore::new(state.db.connection());

    match store.get_by_id(id).await.context("failed to get bookmark")? {
        Some(bookmark) => Ok((StatusCode::OK, Json(bookmark.sanitized())).into_response()),
        None => {
            tracing::error!("no bookmark found with id {}", id);
            Err(ApiError::NotFound)
        }
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkCandidate>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(candidate) = payload.map_err(|rejection| {
        tracing::error!("invalid bookmark body: {}", rejection.body_text());
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let new_bookmark = validate_create(candidate).inspect_err(|e| tracing::error!("{}", e))?;

    let store = BookmarkStore::new(state.db.connection());
    let bookmark = store.insert(new_bookmark).await.context("failed to create bookmark")?;

    tracing::info!("created bookmark with id {}", bookmark.id);
    let location = format!("/bookmarks/{}", bookmark.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(bookmark.sanitized())).into_response())
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let store = BookmarkStore::new(state.db.connection());

    match store.delete_by_id(id).await.context("failed to delete bookmark")? {
        Deletion::Deleted => {
            tracing::info!("bookmark with id {} deleted", id);
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Deletion::NotFound => {
            tracing::error!("no bookmark found with id {}", id);
            Err(ApiError::NotFound)
        }
    }
}

/// Accepts any body and changes nothing.
pub async fn update_bookmark(Path(id): Path<String>, body: Bytes) -> StatusCode {
    tracing::info!(id = %id, body_len = body.len(), "ignoring bookmark update");
    StatusCode::NO_CONTENT
}
