use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/webhook",
        get(handlers::webhook::verify).post(handlers::webhook::receive),
    )
}
