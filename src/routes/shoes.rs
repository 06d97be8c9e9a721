use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::models::{ErrorResponse, RandomShoeResponse, ShoeTypeQuery, ShoeTypeResponse};
use crate::routes::{current_measurement, AppState};

/// Configure catalog routes. Fixed paths go before `/shoes/{model}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/shoes/type", web::get().to(get_shoe_type))
        .route("/shoes/random", web::get().to(get_random_shoe))
        .route("/shoes/{model}", web::get().to(shoe_detail));
}

/// Per-size scores of one model
///
/// GET /api/v1/shoes/{model}
async fn shoe_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    let model_name = path.into_inner();

    let Some(shoe) = state.catalog.find_model(&model_name) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Model not found".to_string(),
            message: format!("No shoe model named {}", model_name),
            status_code: 404,
        });
    };

    let measurement = current_measurement(&state, &http_req).await;
    let detail = state.matcher.size_detail(measurement.as_ref(), shoe);

    tracing::debug!(
        "Detail for {}: best size {:?} ({})",
        shoe.model,
        detail.best_eu,
        detail.best_compatibility
    );

    HttpResponse::Ok().json(detail)
}

/// Sizing profile of a model
///
/// GET /api/v1/shoes/type?model={model}
async fn get_shoe_type(
    state: web::Data<AppState>,
    query: web::Query<ShoeTypeQuery>,
) -> impl Responder {
    let sizing = state.catalog.shoe_type(&query.model);

    HttpResponse::Ok().json(ShoeTypeResponse {
        shoe_type: sizing.label().to_string(),
    })
}

/// Any model from the catalog
///
/// GET /api/v1/shoes/random
async fn get_random_shoe(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.random_model() {
        Some(shoe) => HttpResponse::Ok().json(RandomShoeResponse {
            model: shoe.model.clone(),
            sizes_available: shoe.sizes.len(),
        }),
        None => HttpResponse::Ok().json(serde_json::json!({ "error": "No shoes available" })),
    }
}
