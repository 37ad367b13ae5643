use crate::core::SearchOutcome;
use crate::models::{
    DeleteResponse, ErrorResponse, HealthResponse, OwnerQuery, RunSearchRequest, SearchResponse,
    UploadPurpose,
};
use crate::routes::AppState;
use crate::services::StoreError;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search/run", web::post().to(run_search))
        .route("/search/results", web::get().to(list_results))
        .route("/search/results/{id}", web::delete().to(delete_result));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run an AI search for one child
///
/// POST /api/v1/search/run
///
/// Request body:
/// ```json
/// {
///   "userId": "uuid",
///   "childProfileId": "uuid"
/// }
/// ```
///
/// Scores the child against every compatible entry uploaded for AI Search
/// and persists the whole batch in one write. Individual scoring failures
/// degrade to neutral results; a failed batch write fails the entire
/// invocation with nothing saved.
async fn run_search(
    state: web::Data<AppState>,
    req: web::Json<RunSearchRequest>,
) -> impl Responder {
    let user_id = req.user_id;

    // The child profile is required; no child, no search
    let child = match state
        .store
        .get_child_profile(req.child_profile_id, user_id)
        .await
    {
        Ok(child) => child,
        Err(StoreError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Child profile not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch child profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch child profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Fetch the account's library; the pipeline selects the AI Search pool
    let entries = match state.store.list_library(user_id, None).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to load resume library for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load resume library".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!(
        "Starting AI search for {} with {} library entries",
        child.name,
        entries.len()
    );

    let outcome = state
        .matchmaker
        .score_batch(&child, &entries, UploadPurpose::AiSearch)
        .await;

    // Translate the pipeline outcome for presentation
    match outcome {
        SearchOutcome::EmptyPool => HttpResponse::Ok().json(SearchResponse {
            matches: vec![],
            total_processed: 0,
            original_count: 0,
            filtered_by_gender: 0,
            message: Some("No resumes found for AI Search".to_string()),
        }),
        SearchOutcome::NoCompatibleCandidates { target, pool_size } => {
            let looking_for = target.map(|g| g.as_str()).unwrap_or("compatible");
            HttpResponse::Ok().json(SearchResponse {
                matches: vec![],
                total_processed: 0,
                original_count: pool_size,
                filtered_by_gender: pool_size,
                message: Some(format!(
                    "No resumes found with compatible gender (looking for {} candidates)",
                    looking_for
                )),
            })
        }
        SearchOutcome::Completed {
            pairs,
            pool_size,
            filtered_out,
        } => {
            // One batch write; a failure here loses the whole search
            let records = match state.store.insert_match_batch(user_id, &pairs).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Failed to save match batch for {}: {}", user_id, e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to save match results".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };

            tracing::info!(
                "AI search completed with {} matches for {} (from {} uploaded resumes)",
                records.len(),
                child.name,
                pool_size
            );

            HttpResponse::Ok().json(SearchResponse {
                total_processed: pairs.len(),
                original_count: pool_size,
                filtered_by_gender: filtered_out,
                matches: records,
                message: None,
            })
        }
    }
}

/// List persisted match results for an account
///
/// GET /api/v1/search/results?userId={userId}
async fn list_results(state: web::Data<AppState>, query: web::Query<OwnerQuery>) -> impl Responder {
    match state.store.list_match_results(query.user_id).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            tracing::error!("Failed to load match results for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load match results".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Delete one match result
///
/// DELETE /api/v1/search/results/{id}?userId={userId}
async fn delete_result(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<OwnerQuery>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_match_result(id, query.user_id).await {
        Ok(true) => HttpResponse::Ok().json(DeleteResponse { success: true }),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("Match result {} not found", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to delete match result {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete match result".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
