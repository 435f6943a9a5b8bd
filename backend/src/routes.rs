use axum::routing::post;
use axum::Router;

use crate::handlers::upload_cloud;

pub fn api_routes() -> Router {
    Router::new().route("/upload", post(upload_cloud))
}
