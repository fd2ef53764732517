pub mod app_state;
pub mod model;
pub mod repository;
pub mod service;
pub mod solution_handlers;

pub use common_http_errors::ApiError;

use axum::{routing::get, Router};

use app_state::AppState;
use solution_handlers::{
    create_solution, delete_solution, get_solution, health, list_low_stock, list_solutions,
    update_solution,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/v1/solutions", get(list_solutions).post(create_solution))
        .route("/api/v1/solutions/low-stock", get(list_low_stock))
        .route(
            "/api/v1/solutions/:id",
            get(get_solution).put(update_solution).delete(delete_solution),
        )
        .with_state(state)
}
