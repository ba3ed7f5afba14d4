//! Request handlers.
//!
//! Each handler translates one HTTP request into a single store operation.
//! Ids arrive as raw path segments and are parsed here; range checks happen
//! inside the store.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::error::Error;
use crate::note::{Info, Note, NoteId, NoteList, NoteRequest};

/// Parse the `{id}` path segment.
///
/// A segment axum cannot decode (for example invalid UTF-8 after
/// percent-decoding) is reported as an invalid id.
fn note_id(path: Result<Path<String>, PathRejection>) -> Result<NoteId, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        debug!(error = %rejection, "Undecodable note id");
        Error::InvalidNoteId
    })?;
    Ok(NoteId::parse(&raw)?)
}

/// Get service information.
#[utoipa::path(
    get,
    path = "/info",
    tag = "info",
    operation_id = "info-status",
    security(("my_auth" = [])),
    responses(
        (status = 200, description = "Service identity and status", body = Info),
    )
)]
pub async fn info() -> Json<Info> {
    Json(Info::default())
}

/// Fetch all the notes.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "notes",
    operation_id = "notes-fetchAll",
    security(("my_auth" = [])),
    responses(
        (status = 200, description = "Every note in storage order", body = NoteList),
    )
)]
pub async fn list_notes(State(state): State<AppState>) -> Json<NoteList> {
    Json(NoteList {
        notes: state.store.list().await,
    })
}

/// Add a new note at the end of the list.
#[utoipa::path(
    post,
    path = "/notes",
    tag = "notes",
    operation_id = "notes-add",
    security(("my_auth" = [])),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note stored"),
        (status = 400, description = "Body is not a note", body = String, content_type = "text/plain"),
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let req = NoteRequest::from_slice(&body)?;
    state.store.create(req.into()).await;
    Ok(StatusCode::OK)
}

/// Fetch a single note by index.
#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "notes",
    operation_id = "notes-fetchOne",
    security(("my_auth" = [])),
    params(("id" = i64, Path, description = "Index of the note")),
    responses(
        (status = 200, description = "The note at the index", body = Note),
        (status = 400, description = "Missing or invalid note id", body = String, content_type = "text/plain"),
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(path)?;
    Ok(Json(state.store.get(id).await?))
}

/// Replace the note at the specified index.
///
/// The id is checked before the body is decoded.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "notes",
    operation_id = "notes-update",
    security(("my_auth" = [])),
    params(("id" = i64, Path, description = "Index of the note")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note replaced"),
        (status = 400, description = "Missing or invalid note id, or body is not a note", body = String, content_type = "text/plain"),
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = note_id(path)?;
    let req = match NoteRequest::from_slice(&body) {
        Ok(req) => req,
        Err(err) => {
            // An unknown id outranks a bad body.
            state.store.get(id).await?;
            return Err(err.into());
        }
    };
    state.store.update(id, req.into()).await?;
    Ok(StatusCode::OK)
}

/// Remove a single note by index.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "notes",
    operation_id = "notes-remove",
    security(("my_auth" = [])),
    params(("id" = i64, Path, description = "Index of the note")),
    responses(
        (status = 200, description = "Note removed; later notes move down one index"),
        (status = 400, description = "Missing or invalid note id", body = String, content_type = "text/plain"),
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = note_id(path)?;
    state.store.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Fallback for `/notes/` with an empty id segment.
pub async fn missing_note_id() -> ApiError {
    ApiError(Error::MissingNoteId)
}
