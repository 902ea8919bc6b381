//! Document handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    middleware::AllowSlots,
    models::{Document, DocumentResource},
    state::AppState,
};

use super::request::{CreateDocumentRequest, UpdateDocumentRequest};

type Slots = AllowSlots<DocumentResource>;

/// List all documents
pub async fn index(State(state): State<AppState>, slots: Slots) -> Json<Vec<Document>> {
    slots.set_current(DocumentResource::Collection);
    Json(state.list_documents().await)
}

/// Create a new draft document
pub async fn create(
    State(state): State<AppState>,
    slots: Slots,
    Json(payload): Json<CreateDocumentRequest>,
) -> (StatusCode, Json<Document>) {
    let document = state.create_document(payload.title).await;
    slots.set_current(DocumentResource::Member(document.clone()));
    (StatusCode::CREATED, Json(document))
}

/// Get a specific document
pub async fn show(
    State(state): State<AppState>,
    slots: Slots,
    Path(id): Path<u64>,
) -> Result<Json<Document>, StatusCode> {
    let document = state.get_document(id).await.ok_or(StatusCode::NOT_FOUND)?;
    slots.set_current(DocumentResource::Member(document.clone()));
    Ok(Json(document))
}

/// Update a document
pub async fn update(
    State(state): State<AppState>,
    slots: Slots,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, StatusCode> {
    let document = state
        .update_document(id, |document| {
            if let Some(title) = payload.title {
                document.title = title;
            }
            if let Some(status) = payload.status {
                document.status = status;
            }
        })
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    slots.set_current(DocumentResource::Member(document.clone()));
    Ok(Json(document))
}

/// Delete a document
pub async fn destroy(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    match state.delete_document(id).await {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
