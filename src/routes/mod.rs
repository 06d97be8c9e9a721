// Route exports
pub mod measurements;
pub mod shoes;

use actix_web::{web, HttpRequest};
use std::sync::Arc;

use crate::core::Matcher;
use crate::models::{Catalog, UserMeasurement};
use crate::services::MeasurementStore;

/// Cookie carrying the opaque session token
pub const SESSION_COOKIE: &str = "session_id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MeasurementStore>,
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(measurements::configure)
            .configure(shoes::configure),
    );
}

/// Session token sent by the client, if any
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Measurements saved for the requesting session
///
/// A failing shared store is treated as "nothing saved".
pub async fn current_measurement(state: &AppState, req: &HttpRequest) -> Option<UserMeasurement> {
    let token = session_token(req)?;
    match state.store.get(&token).await {
        Ok(measurement) => measurement,
        Err(e) => {
            tracing::warn!("Failed to read measurements for session {}: {}", token, e);
            None
        }
    }
}
