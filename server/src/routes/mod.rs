use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::db::ConnectionProvider;
use crate::handlers::health_check;

pub fn create_routes(db: ConnectionProvider) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}
