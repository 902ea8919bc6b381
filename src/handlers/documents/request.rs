//! Document request DTOs

use serde::Deserialize;

use crate::models::DocumentStatus;

/// Create document request
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
}

/// Update document request
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub status: Option<DocumentStatus>,
}
