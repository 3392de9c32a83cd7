use crate::dtos::{DeleteResponse, DocumentListResponse, DocumentResponse};
use crate::extraction;
use crate::models::{Document, FileType};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use service_core::error::AppError;
use service_core::middleware::RequestId;
use uuid::Uuid;

const UNNAMED_FILE: &str = "unnamed";
const FILE_FIELD: &str = "file";

pub async fn list_documents(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let documents = state
        .store
        .list()
        .await?
        .into_iter()
        .map(DocumentResponse::from)
        .collect();

    Ok(Json(DocumentListResponse { documents }))
}

/// The file part of an upload form, read into memory.
struct UploadedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Returns the first part that carries a file, skipping plain form fields
/// such as `description`.
async fn next_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        if field.file_name().is_none() && field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = sanitize_filename(field.file_name());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(multipart_rejection)?;

        return Ok(Some(UploadedFile {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}

pub async fn upload_document(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let UploadedFile {
        filename,
        content_type,
        data,
    } = next_file_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;

    let Some(file_type) = FileType::from_mime(&content_type) else {
        tracing::error!(
            request_id = %request_id.0,
            filename = %filename,
            content_type = %content_type,
            "Unsupported file type"
        );
        metrics::record_upload_rejected("unsupported_type");
        return Err(AppError::UnsupportedMediaType(
            "Unsupported file type".to_string(),
        ));
    };

    let max_bytes = state.config.limits.max_upload_bytes;
    if data.len() > max_bytes {
        tracing::error!(
            request_id = %request_id.0,
            filename = %filename,
            size = data.len(),
            max_bytes,
            "File too large"
        );
        metrics::record_upload_rejected("too_large");
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds {} MB limit",
            max_bytes / (1024 * 1024)
        )));
    }

    let document_id = Uuid::new_v4().to_string();
    let stored_name = Document::stored_file_name(&document_id, &filename);

    tracing::info!(
        request_id = %request_id.0,
        document_id = %document_id,
        filename = %filename,
        file_type = %file_type,
        size = data.len(),
        "Document upload started"
    );

    let path = state.storage.store(&stored_name, &data).await.map_err(|e| {
        tracing::error!(document_id = %document_id, "Failed to write {}: {}", stored_name, e);
        e
    })?;

    let text = match extraction::extract_text(state.extractors.clone(), path, file_type).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(
                document_id = %document_id,
                filename = %filename,
                error = %e,
                "Extraction failed"
            );
            metrics::record_extraction_failure(file_type);
            if let Err(cleanup) = state.storage.remove(&stored_name).await {
                tracing::warn!(
                    document_id = %document_id,
                    error = %cleanup,
                    "Failed to remove file after extraction failure"
                );
            }
            return Err(AppError::ExtractionFailed(e.into()));
        }
    };

    let document = Document::completed(
        document_id,
        filename,
        file_type,
        data.len() as u64,
        &text,
    );
    state.store.put(document.clone()).await?;
    metrics::record_upload(file_type);

    tracing::info!(
        document_id = %document.id,
        filename = %document.filename,
        file_type = %document.file_type,
        extracted_text_length = document.extracted_text_length,
        "Document upload completed successfully"
    );

    Ok(Json(DocumentResponse::from(document)))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let document = state
        .store
        .get(&document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Document not found")))?;

    Ok(Json(DocumentResponse::from(document)))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.get(&document_id).await?.is_none() {
        return Err(AppError::NotFound(anyhow::anyhow!("Document not found")));
    }

    // Files are best-effort: a failed removal is reported, never returned.
    let failures = match state
        .storage
        .remove_prefixed(&Document::file_prefix(&document_id))
        .await
    {
        Ok(report) => {
            for failure in &report.failures {
                tracing::warn!(
                    document_id = %document_id,
                    file = %failure.file_name,
                    error = %failure.error,
                    "Error deleting file"
                );
            }
            report.failures.len()
        }
        Err(e) => {
            tracing::warn!(
                document_id = %document_id,
                error = %e,
                "Could not scan upload directory"
            );
            1
        }
    };

    state.store.delete(&document_id).await?;
    metrics::record_delete(failures);

    tracing::info!(
        document_id = %document_id,
        cleanup_failures = failures,
        "Deleted document"
    );

    Ok(Json(DeleteResponse {
        message: "Document deleted successfully".to_string(),
    }))
}

/// Keeps only the final path component of a client-supplied filename.
fn sanitize_filename(raw: Option<&str>) -> String {
    raw.and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or(UNNAMED_FILE)
        .to_string()
}

fn multipart_rejection(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        metrics::record_upload_rejected("too_large");
        AppError::PayloadTooLarge("Request body exceeds the upload limit".to_string())
    } else {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart body: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_stripped_from_filenames() {
        assert_eq!(sanitize_filename(Some("../../etc/passwd.txt")), "passwd.txt");
        assert_eq!(sanitize_filename(Some("C:\\Users\\me\\notes.docx")), "notes.docx");
        assert_eq!(sanitize_filename(Some("report.pdf")), "report.pdf");
    }

    #[test]
    fn missing_or_degenerate_filenames_get_placeholder() {
        assert_eq!(sanitize_filename(None), UNNAMED_FILE);
        assert_eq!(sanitize_filename(Some("")), UNNAMED_FILE);
        assert_eq!(sanitize_filename(Some("uploads/")), UNNAMED_FILE);
        assert_eq!(sanitize_filename(Some("..")), UNNAMED_FILE);
    }
}
