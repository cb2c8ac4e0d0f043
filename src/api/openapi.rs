//! OpenAPI document for the served routes.
//!
//! Add new endpoints to `paths(...)` so they show up in the generated spec
//! served under `/swagger-ui`.

use utoipa::OpenApi;

use crate::api::handlers::{auth, health, me, root};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::signup::signup,
        auth::login::login,
        me::me,
    ),
    components(schemas(
        auth::SignupRequest,
        auth::LoginRequest,
        auth::AuthResponse,
        auth::MeResponse,
        auth::UserView,
    )),
    tags(
        (name = "root", description = "API index"),
        (name = "health", description = "Service health"),
        (name = "auth", description = "Signup, login, and session tokens"),
        (name = "me", description = "Authenticated identity"),
    )
)]
pub struct ApiDoc;
