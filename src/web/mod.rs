pub mod auth;
pub mod ctx;
pub mod error;
pub mod extract;
pub mod gate;
pub mod mw_auth;
pub mod routes;

use std::path::Path;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::auth::{admin_token::AdminGuard, staff_session::StaffSessionSigner};
use crate::config::AppConfig;
use crate::db::connection::DbConnection;
use crate::prelude::*;

/// Pages and the file that renders each of them, relative to the static dir.
pub const PAGES: [(&str, &str); 6] = [
    ("/", "index.html"),
    ("/login", "login.html"),
    ("/register", "register.html"),
    ("/admin", "admin/index.html"),
    ("/admin/staff", "admin/staff.html"),
    ("/admin/applications", "admin/applications.html"),
];

/// Shared, read-only request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub connection: DbConnection,
    pub admin: AdminGuard,
    pub staff_sessions: StaffSessionSigner,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, connection: DbConnection) -> Result<Self> {
        Ok(Self {
            connection,
            admin: AdminGuard::new(config.admin_password.as_deref())?,
            staff_sessions: StaffSessionSigner::new(&config.staff_session_secret)?,
            secure_cookies: config.secure_cookies,
        })
    }
}

fn with_pages(router: Router<AppState>, static_dir: &Path) -> Router<AppState> {
    PAGES
        .iter()
        .fold(router, |router, (path, file)| {
            router.route_service(path, ServeFile::new(static_dir.join(file)))
        })
        .fallback_service(ServeDir::new(static_dir))
}

/// Builds the application router. Every request, pages included, passes
/// through the route gate.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/auth/staff/login", post(auth::staff_login))
        .route("/api/auth/staff/logout", post(auth::staff_logout))
        .route("/api/auth/staff/session", get(auth::staff_session))
        .route("/api/auth/staff/register", post(auth::staff_register))
        .route("/api/admin/login", post(auth::admin_login))
        .route("/api/admin/session", get(auth::admin_session))
        .route(
            "/api/admin/department-attendance",
            get(routes::get_department_attendance),
        )
        .route("/api/staff", get(routes::get_staff).post(routes::post_staff))
        .route(
            "/api/staff/{id}",
            patch(routes::patch_staff).delete(routes::delete_staff),
        )
        .route(
            "/api/applications",
            get(routes::get_applications).post(routes::post_application),
        )
        .route("/api/applications/{id}", patch(routes::patch_application))
        .route(
            "/api/attendance",
            get(routes::get_attendance).post(routes::post_attendance),
        )
        .route("/api/seed", post(routes::post_seed));

    let router = match static_dir {
        Some(dir) => with_pages(router, dir),
        None => router,
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_auth::mw_route_gate,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests;
