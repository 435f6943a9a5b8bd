use std::net::SocketAddr;

use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::api_routes;

mod error;
mod handlers;
mod routes;

/// Caps a whole upload; clouds beyond this are a non-goal.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = api_routes()
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    info!("🚀 Listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
