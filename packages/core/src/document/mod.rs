mod error;
mod model;
mod service;

pub use error::{DocumentError, DocumentResult};
pub use model::{DocumentMetadata, DocumentMetadataView, FileBytes, UserDocument};
pub use service::DocumentService;
