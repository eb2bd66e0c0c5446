use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use document_core::UserDocument;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::document::{DocumentDataResponse, DocumentListQuery, DocumentMetadataView};
use crate::state::AppState;

/// Allow the configured document size plus room for the multipart framing.
pub fn upload_body_limit(max_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_size + 4096)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Documents",
    operation_id = "listDocuments",
    summary = "List documents",
    description = "Returns one page of document metadata ordered by ID. A negative page number, \
        a non-positive limit or a page past the end yields an empty list.",
    params(DocumentListQuery),
    responses(
        (status = 200, description = "Page of documents", body = Vec<DocumentMetadataView>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<Vec<DocumentMetadataView>>, AppError> {
    let page = state
        .documents
        .get_page(query.page_number(), query.limit())
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Documents",
    operation_id = "createDocument",
    summary = "Upload a new document",
    description = "Stores the `file` multipart field as a new document named after its filename. \
        The content type is taken from the part or guessed from the filename.",
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "Document created"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "A document with this name exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let document = read_user_document(multipart).await?;
    state.documents.save_document(document).await?;

    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Documents",
    operation_id = "getDocument",
    summary = "Get document metadata",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document metadata", body = DocumentMetadataView),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentMetadataView>, AppError> {
    Ok(Json(state.documents.get_metadata_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/data",
    tag = "Documents",
    operation_id = "getDocumentData",
    summary = "Get document content",
    description = "Returns the document payload encoded as base64.",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document content", body = DocumentDataResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_document_data(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentDataResponse>, AppError> {
    let content = state.documents.get_encoded_bytes(id).await?;

    Ok(Json(DocumentDataResponse { id, content }))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Documents",
    operation_id = "updateDocument",
    summary = "Replace a document",
    description = "Replaces the name, content type and content of an existing document with the \
        uploaded `file` field. The document keeps its ID.",
    params(("id" = i64, Path, description = "Document ID")),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 200, description = "Document updated"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Another document has this name (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let document = read_user_document(multipart).await?;
    state.documents.update_document(id, document).await?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Documents",
    operation_id = "deleteDocument",
    summary = "Delete a document",
    description = "Deletes the document together with its content.",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.documents.delete_document(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Read the `file` part of an upload into a [`UserDocument`]. Other parts are
/// ignored.
async fn read_user_document(mut multipart: Multipart) -> Result<UserDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| mime_guess::from_path(&name).first_or_octet_stream().to_string());

        let file = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        return Ok(UserDocument {
            name,
            content_type,
            file: file.to_vec(),
        });
    }

    Err(AppError::Validation("Missing 'file' field".into()))
}
