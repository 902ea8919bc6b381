//! Application state management
//!
//! This module contains the shared application state that is passed
//! to the demonstration handlers via Axum's State extractor.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Document, DocumentStatus};

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
#[derive(Default)]
struct AppStateInner {
    /// In-memory document store
    documents: RwLock<BTreeMap<u64, Document>>,

    /// Next document id
    next_id: AtomicU64,
}

impl AppState {
    /// Create an empty application state
    pub fn new() -> Self {
        Self::default()
    }

    /// List all documents ordered by id
    pub async fn list_documents(&self) -> Vec<Document> {
        self.inner.documents.read().await.values().cloned().collect()
    }

    pub async fn document_count(&self) -> usize {
        self.inner.documents.read().await.len()
    }

    /// Get a document by id
    pub async fn get_document(&self, id: u64) -> Option<Document> {
        self.inner.documents.read().await.get(&id).cloned()
    }

    /// Store a new draft document
    pub async fn create_document(&self, title: String) -> Document {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let document = Document {
            id,
            title,
            status: DocumentStatus::Draft,
        };
        self.inner
            .documents
            .write()
            .await
            .insert(id, document.clone());
        document
    }

    /// Apply `update` to a stored document
    pub async fn update_document(
        &self,
        id: u64,
        update: impl FnOnce(&mut Document),
    ) -> Option<Document> {
        let mut documents = self.inner.documents.write().await;
        let document = documents.get_mut(&id)?;
        update(document);
        Some(document.clone())
    }

    /// Remove a document
    pub async fn delete_document(&self, id: u64) -> Option<Document> {
        self.inner.documents.write().await.remove(&id)
    }
}
