//! Document model

use serde::{Deserialize, Serialize};

/// Publication state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub status: DocumentStatus,
}

/// Resource the Allow header is computed against on document routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentResource {
    /// The document collection (`/documents`)
    Collection,
    /// A single document (`/documents/{id}`)
    Member(Document),
}
