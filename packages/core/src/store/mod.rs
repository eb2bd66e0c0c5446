mod error;
mod page;
mod traits;

pub mod memory;

pub use error::StoreError;
pub use memory::InMemoryDocumentStore;
pub use page::PageRequest;
pub use traits::DocumentStore;
