use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::db::ConnectionProvider;
use crate::utils::error::AppResult;
use crate::utils::response::success;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    database: &'static str,
}

/// Liveness plus a round trip through a scoped session.
pub async fn health_check(State(db): State<ConnectionProvider>) -> Response {
    match ping(&db).await {
        Ok(()) => success(
            HealthPayload {
                status: "ok",
                service: "concert-api",
                database: "reachable",
            },
            "Health check successful",
        ),
        Err(err) => err.into_response(),
    }
}

async fn ping(db: &ConnectionProvider) -> AppResult<()> {
    let mut session = db.acquire_session().await?;
    session.execute("SELECT 1").await?;
    session.close().await
}
