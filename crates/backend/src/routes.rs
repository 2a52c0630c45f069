use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::handlers;
use crate::system::telegram::middleware::{init_data_guard, InitDataPolicy};

/// Конфигурация всех роутов приложения
pub fn configure_routes(policy: InitDataPolicy) -> Router {
    // ========================================
    // A001 Requests (за проверкой Telegram initData)
    // ========================================
    let requests = Router::new()
        .route(
            "/api/requests",
            get(handlers::a001_request::list).post(handlers::a001_request::create),
        )
        .route(
            "/api/requests/search",
            get(handlers::a001_request::search),
        )
        .route("/api/requests/stats", get(handlers::a001_request::stats))
        .route(
            "/api/requests/:id",
            get(handlers::a001_request::get_by_id).put(handlers::a001_request::update_status),
        )
        .route(
            "/api/requests/:id/status",
            put(handlers::a001_request::update_status),
        )
        .layer(middleware::from_fn_with_state(
            Arc::new(policy),
            init_data_guard,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/test_db", get(handlers::diagnostics::test_db))
        .merge(requests)
}
