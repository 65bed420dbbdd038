use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::{
        announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        auth::AuthContext,
    },
    AppState,
};

/// GET /announcements/active: public, announcements currently on display.
pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>, AppError> {
    state.announcements.list_active().await.map(Json)
}

/// GET /announcements?username=: teachers only, newest first.
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<Announcement>>, AppError> {
    state.announcements.list_all(&auth).await.map(Json)
}

/// POST /announcements. The body's `created_by` must be a known teacher.
pub async fn create_announcement(
    State(state): State<AppState>,
    body: Result<Json<CreateAnnouncementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let Json(body) = body?;
    state
        .announcements
        .create(&body)
        .await
        .map(|announcement| (StatusCode::CREATED, Json(announcement)))
}

/// PUT /announcements/{id}?username=
pub async fn update_announcement(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    body: Result<Json<UpdateAnnouncementRequest>, JsonRejection>,
) -> Result<Json<Announcement>, AppError> {
    let Json(body) = body?;
    state.announcements.update(&id, &auth, &body).await.map(Json)
}

/// DELETE /announcements/{id}?username=
pub async fn delete_announcement(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.announcements.delete(&id, &auth).await?;
    Ok(Json(json!({ "message": "Announcement deleted successfully" })))
}
