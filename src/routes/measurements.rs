use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ClearMeasurementsResponse, ErrorResponse, HealthResponse, SaveMeasurementRequest};
use crate::routes::{current_measurement, session_token, AppState, SESSION_COOKIE};

/// Configure measurement and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/measurements", web::post().to(save_measurements))
        .route("/measurements", web::get().to(get_measurements))
        .route("/measurements", web::delete().to(clear_measurements))
        .route("/recommendations", web::get().to(get_recommendations));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_models: state.catalog.len(),
    })
}

/// Save measurements for the session
///
/// POST /api/v1/measurements
///
/// Request body:
/// ```json
/// {
///   "length": "27",
///   "width": "10",
///   "oblique_circumference": "32",
///   "foot_type": "Плоскостопие"
/// }
/// ```
async fn save_measurements(
    state: web::Data<AppState>,
    req: web::Json<SaveMeasurementRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for measurements: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let token = session_token(&http_req)
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
    let measurement = req.into_inner().into_measurement();

    if let Err(e) = state.store.put(&token, &measurement).await {
        tracing::error!("Failed to save measurements for session {}: {}", token, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to save measurements".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    tracing::info!("Saved measurements for session {}", token);

    HttpResponse::Ok()
        .cookie(
            Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .json(measurement)
}

/// Measurements saved for the session
async fn get_measurements(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    match current_measurement(&state, &http_req).await {
        Some(measurement) => HttpResponse::Ok().json(measurement),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "No measurements".to_string(),
            message: "No measurements saved for this session".to_string(),
            status_code: 404,
        }),
    }
}

/// Forget the session's measurements
async fn clear_measurements(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    if let Some(token) = session_token(&http_req) {
        if let Err(e) = state.store.delete(&token).await {
            tracing::warn!("Failed to clear measurements for session {}: {}", token, e);
        } else {
            tracing::debug!("Cleared measurements for session {}", token);
        }
    }

    HttpResponse::Ok().json(ClearMeasurementsResponse {
        success: true,
        message: "Measurements cleared".to_string(),
    })
}

/// Ranked recommendations for the session
///
/// GET /api/v1/recommendations
///
/// Returns an empty list when no measurements were saved.
async fn get_recommendations(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let measurement = current_measurement(&state, &http_req).await;

    let result = state
        .matcher
        .find_matches(measurement.as_ref(), &state.catalog);

    tracing::info!(
        "Returning {} recommendations (from {} models)",
        result.recommendations.len(),
        result.total_models
    );

    HttpResponse::Ok().json(result.recommendations)
}
