use serde::{Deserialize, Serialize};

pub use document_core::DocumentMetadataView;

/// Query parameters for listing documents.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct DocumentListQuery {
    /// Zero-based page number. Default: 0.
    pub page_number: Option<i64>,
    /// Page size. Default: 10.
    pub limit: Option<i64>,
}

impl DocumentListQuery {
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10)
    }
}

/// Base64-encoded payload of a document.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentDataResponse {
    #[schema(example = 1)]
    pub id: i64,
    /// Standard base64 with padding.
    #[schema(example = "aGVsbG8=")]
    pub content: String,
}
