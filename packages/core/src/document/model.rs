use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw payload of a document.
///
/// Owned by exactly one [`DocumentMetadata`]. The `id` is assigned by the
/// store on first insert and must be carried over on every later update,
/// otherwise the store allocates a new payload row and orphans the old one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileBytes {
    pub id: Option<i64>,
    pub file: Vec<u8>,
}

impl FileBytes {
    /// A payload that has not been persisted yet.
    pub fn new(file: Vec<u8>) -> Self {
        Self { id: None, file }
    }
}

/// A stored document: descriptive fields plus the owned payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// `None` until the store assigns one.
    pub id: Option<i64>,
    /// Logical key, unique across all documents.
    pub name: String,
    /// Payload length in bytes.
    pub size: i64,
    pub content_type: String,
    pub creation_timestamp: DateTime<Utc>,
    pub file_bytes: FileBytes,
}

impl DocumentMetadata {
    /// Build a fresh, unpersisted record from caller input.
    pub fn from_user_document(document: UserDocument) -> Self {
        Self {
            id: None,
            name: document.name,
            size: document.file.len() as i64,
            content_type: document.content_type,
            creation_timestamp: Utc::now(),
            file_bytes: FileBytes::new(document.file),
        }
    }
}

impl From<UserDocument> for DocumentMetadata {
    fn from(document: UserDocument) -> Self {
        Self::from_user_document(document)
    }
}

/// Primitive input bundle supplied by the transport layer for save/update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDocument {
    pub name: String,
    pub content_type: String,
    pub file: Vec<u8>,
}

/// Metadata of a document as returned to callers. Never carries the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadataView {
    /// Document ID.
    #[schema(example = 1)]
    pub id: i64,
    /// Document name (the uploaded filename).
    #[schema(example = "report.pdf")]
    pub name: String,
    /// Payload size in bytes.
    #[schema(example = 142857)]
    pub size: i64,
    /// MIME content type.
    #[schema(example = "application/pdf")]
    pub content_type: String,
    pub creation_timestamp: DateTime<Utc>,
}

impl DocumentMetadataView {
    /// Project a persisted record. Records without an id have not been stored
    /// and cannot be viewed.
    pub fn from_metadata(metadata: &DocumentMetadata) -> Option<Self> {
        Some(Self {
            id: metadata.id?,
            name: metadata.name.clone(),
            size: metadata.size,
            content_type: metadata.content_type.clone(),
            creation_timestamp: metadata.creation_timestamp,
        })
    }
}
