use crate::models::{
    DeleteResponse, ErrorResponse, LibraryQuery, OwnerQuery, UploadPurpose, UploadResponse,
};
use crate::routes::AppState;
use actix_multipart::form::{bytes::Bytes as UploadedFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// Configure resume-library routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/library/upload", web::post().to(upload_resume))
        .route("/library", web::get().to(list_library))
        .route("/library/{id}", web::delete().to(delete_entry));
}

/// Multipart upload form: the document plus its provenance fields
#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    #[multipart(limit = "10MB")]
    pub file: UploadedFile,
    #[multipart(rename = "userId")]
    pub user_id: Text<String>,
    #[multipart(rename = "uploadedBy")]
    pub uploaded_by: Text<String>,
    #[multipart(rename = "uploadedFor")]
    pub uploaded_for: Option<Text<String>>,
}

/// Upload a resume into the library
///
/// POST /api/v1/library/upload
///
/// The document is forwarded to the extraction service, a library row is
/// created, and structured extraction runs best-effort afterwards. A failed
/// extraction or parse never fails the upload; the entry simply carries no
/// parsed data.
async fn upload_resume(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> impl Responder {
    let user_id = match Uuid::parse_str(&form.user_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid userId".to_string(),
                message: "userId must be a UUID".to_string(),
                status_code: 400,
            });
        }
    };

    let uploaded_for = form
        .uploaded_for
        .as_ref()
        .map(|purpose| purpose.0.as_str())
        .unwrap_or(UploadPurpose::AiProfile.as_str())
        .to_string();

    let file_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "resume".to_string());

    tracing::info!("Uploading {} for user {} ({})", file_name, user_id, uploaded_for);

    // Forward the document to the external extraction service
    let file_content = match state
        .extractor
        .extract_text(&file_name, form.file.data.to_vec())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to extract text from {}: {}", file_name, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to extract document text".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Create the library row before parsing; parsing is best-effort
    let mut entry = match state
        .store
        .insert_library_entry(user_id, &form.uploaded_by, &uploaded_for)
        .await
    {
        Ok(entry) => entry,
        Err(e) => {
            tracing::error!("Failed to create library entry: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save resume".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Structured extraction; absorbs its own failures
    let profile = state.parser.parse(&file_content).await;

    if let Err(e) = state
        .store
        .set_parsed_profile(entry.id, user_id, &profile)
        .await
    {
        // The upload already succeeded; the entry just stays unparsed
        tracing::warn!("Failed to store parsed data for entry {}: {}", entry.id, e);
    } else {
        entry.parsed_data = Some(profile);
    }

    HttpResponse::Ok().json(UploadResponse {
        parsed: entry.parsed_data.is_some(),
        entry,
    })
}

/// List library entries for an account
///
/// GET /api/v1/library?userId={userId}&uploadedFor={purpose}
async fn list_library(
    state: web::Data<AppState>,
    query: web::Query<LibraryQuery>,
) -> impl Responder {
    match state
        .store
        .list_library(query.user_id, query.uploaded_for.as_deref())
        .await
    {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => {
            tracing::error!("Failed to list library for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load resume library".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Delete a library entry
///
/// DELETE /api/v1/library/{id}?userId={userId}
///
/// Match results referencing the entry are left in place.
async fn delete_entry(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<OwnerQuery>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_library_entry(id, query.user_id).await {
        Ok(true) => HttpResponse::Ok().json(DeleteResponse { success: true }),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("Library entry {} not found", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to delete library entry {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete resume".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
