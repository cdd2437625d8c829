//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    clock::Clock,
    endpoints,
    expense::{create_expense_endpoint, list_expenses_endpoint},
    logging_middleware,
    stores::ExpenseStore,
};

/// Return a router with all the app's routes.
pub fn build_router<C, S>(state: AppState<C, S>) -> Router
where
    C: Clock + Clone + Send + Sync + 'static,
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint::<C, S>).post(create_expense_endpoint::<C, S>),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
