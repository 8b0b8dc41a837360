// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_chart, create_default_chart, delete_chart, get_chart, health_check, list_chart_types,
    list_charts, update_chart,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart-types", get(list_chart_types))
        .route("/projects/:project/charts", get(list_charts).post(add_chart))
        .route("/projects/:project/charts/defaults", post(create_default_chart))
        .route(
            "/projects/:project/charts/:id",
            get(get_chart).put(update_chart).delete(delete_chart),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
