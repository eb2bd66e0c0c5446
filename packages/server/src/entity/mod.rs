pub mod document_metadata;
pub mod file_bytes;
