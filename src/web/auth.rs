//! Staff and admin session endpoints.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};

use super::{AppState, ctx::Ctx, extract::ApiJson, gate::AdminStatus};
use crate::auth::{
    ADMIN_COOKIE, STAFF_COOKIE,
    auth::{AdminLoginRequest, StaffLoginRequest, authenticate},
};
use crate::prelude::*;
use crate::staff::StaffDb;
use crate::staff::api::{RegisterResponse, StaffPost, StaffProfile};

pub const ADMIN_COOKIE_MAX_AGE: Duration = Duration::hours(24);
pub const STAFF_COOKIE_MAX_AGE: Duration = Duration::days(7);

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffLoginResponse {
    pub success: bool,
    pub staff: StaffProfile,
}

/// `staff` is `null` when nobody is signed in.
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffSessionResponse {
    pub staff: Option<StaffProfile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminSessionResponse {
    pub authenticated: bool,
}

/// HttpOnly, SameSite=Lax, site wide.
pub fn session_cookie(
    name: &'static str,
    value: String,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(max_age)
        .build()
}

#[axum::debug_handler]
pub async fn staff_login(
    State(state): State<AppState>,
    cookies: Cookies,
    ApiJson(payload): ApiJson<StaffLoginRequest>,
) -> Result<Json<StaffLoginResponse>> {
    let staff = authenticate(&payload, &state.connection)?;
    let value = state.staff_sessions.sign(&staff.id.to_string());
    cookies.add(session_cookie(
        STAFF_COOKIE,
        value,
        STAFF_COOKIE_MAX_AGE,
        state.secure_cookies,
    ));
    tracing::debug!("Staff {} signed in", staff.id);

    Ok(Json(StaffLoginResponse {
        success: true,
        staff: staff.into(),
    }))
}

#[axum::debug_handler]
pub async fn staff_logout(State(state): State<AppState>, cookies: Cookies) -> Json<SuccessResponse> {
    cookies.add(session_cookie(
        STAFF_COOKIE,
        String::new(),
        Duration::ZERO,
        state.secure_cookies,
    ));
    Json(SuccessResponse::ok())
}

#[axum::debug_handler]
pub async fn staff_session(
    State(state): State<AppState>,
    ctx: Ctx,
) -> Result<Json<StaffSessionResponse>> {
    let staff = match ctx.staff_id {
        Some(id) => StaffDb::find_by_id(&id, &state.connection)?,
        None => None,
    };
    Ok(Json(StaffSessionResponse {
        staff: staff.map(StaffProfile::from),
    }))
}

#[axum::debug_handler]
pub async fn staff_register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<StaffPost>,
) -> Result<Json<RegisterResponse>> {
    Ok(Json(payload.register(&state.connection)?))
}

#[axum::debug_handler]
pub async fn admin_login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<ApiJson<AdminLoginRequest>, Error>,
) -> Result<Json<SuccessResponse>> {
    if !state.admin.is_configured() {
        return Err(Error::AdminNotConfigured);
    }
    let ApiJson(payload) = payload?;
    let submitted = payload.password.unwrap_or_default();
    if !state.admin.check_password(&submitted) {
        tracing::warn!("Rejected admin login");
        return Err(Error::WrongAdminPassword);
    }

    let token = state.admin.token().ok_or(Error::AdminNotConfigured)?;
    cookies.add(session_cookie(
        ADMIN_COOKIE,
        token,
        ADMIN_COOKIE_MAX_AGE,
        state.secure_cookies,
    ));
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn admin_session(ctx: Ctx) -> Json<AdminSessionResponse> {
    Json(AdminSessionResponse {
        authenticated: ctx.admin == AdminStatus::Authenticated,
    })
}
