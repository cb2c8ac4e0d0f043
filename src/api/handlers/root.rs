use axum::response::{IntoResponse, Json};
use serde_json::json;

// axum handler for the API index
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API info"),
    ),
    tag = "root"
)]
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "auth": {
                "signup": "POST /signup",
                "login": "POST /login",
                "me": "GET /me",
            },
        },
    }))
}
