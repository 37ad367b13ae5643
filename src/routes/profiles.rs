use crate::models::{
    CreateProfileRequest, ErrorResponse, GenerateProfileRequest, GenerateProfileResponse,
    OwnerQuery,
};
use crate::routes::AppState;
use crate::services::StoreError;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure child-profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::post().to(create_profile))
        .route("/profiles", web::get().to(list_profiles))
        .route("/profiles/generate", web::post().to(generate_profile));
}

/// Create a child profile from form input
///
/// POST /api/v1/profiles
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.store.create_child_profile(&req).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => {
            tracing::error!("Failed to create child profile: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to create profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List child profiles for an account
///
/// GET /api/v1/profiles?userId={userId}
async fn list_profiles(state: web::Data<AppState>, query: web::Query<OwnerQuery>) -> impl Responder {
    match state.store.list_child_profiles(query.user_id).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!("Failed to list profiles for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load profiles".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Generate a narrative shidduch profile for a library entry
///
/// POST /api/v1/profiles/generate
///
/// Request body:
/// ```json
/// {
///   "userId": "uuid",
///   "libraryId": "uuid",
///   "notes": ["research note", "..."]
/// }
/// ```
async fn generate_profile(
    state: web::Data<AppState>,
    req: web::Json<GenerateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let entry = match state.store.get_library_entry(req.library_id).await {
        Ok(entry) => entry,
        Err(StoreError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Library entry not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch library entry {}: {}", req.library_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch resume details".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let summary = match state.writer.write(&entry, &req.notes).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to generate profile for entry {}: {}", entry.id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to generate AI profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state
        .store
        .insert_ai_profile(req.user_id, entry.id, &summary)
        .await
    {
        Ok(profile) => HttpResponse::Ok().json(GenerateProfileResponse { profile }),
        Err(e) => {
            tracing::error!("Failed to save generated profile: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save generated profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
