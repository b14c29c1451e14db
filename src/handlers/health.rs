use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Debug, Serialize)]
struct ReadinessChecks {
    database: &'static str,
}

impl Readiness {
    fn from_store(reachable: bool) -> (StatusCode, Self) {
        let (code, status, database) = if reachable {
            (StatusCode::OK, "ready", "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready", "failed")
        };
        (
            code,
            Self {
                status,
                checks: ReadinessChecks { database },
            },
        )
    }
}

/// Liveness. Never touches the store.
pub async fn health_check() -> Json<Health> {
    Json(Health {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: 503 while the record store is unreachable.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let reachable = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Record store ping failed");
            false
        }
    };
    let (code, body) = Readiness::from_store(reachable);
    (code, Json(body))
}
