pub mod document;
pub mod store;

pub use document::{
    DocumentError, DocumentMetadata, DocumentMetadataView, DocumentResult, DocumentService,
    FileBytes, UserDocument,
};
pub use store::{DocumentStore, PageRequest, StoreError};
