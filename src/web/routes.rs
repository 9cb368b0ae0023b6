//! Data endpoints for staff, applications, attendance and seeding.

use axum::{Json, extract::State};
use uuid::Uuid;

use super::{
    AppState,
    auth::SuccessResponse,
    ctx::StaffCtx,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use crate::application::api::{
    ApplicationApi, ApplicationPost, ApplicationQuery, ApplicationStatusPatch, list_applications,
};
use crate::attendance::api::{AttendanceApi, AttendancePost, list_attendance};
use crate::db::connection::DbConnection;
use crate::department::{DepartmentAttendance, department_attendance};
use crate::prelude::*;
use crate::staff::StaffDb;
use crate::staff::api::{PasswordReset, SeedResponse, StaffApi, StaffPost, list_staff, seed_sample_staff};

/// The account behind a staff session. A session whose account was deleted
/// counts as signed out.
fn signed_in_staff(ctx: StaffCtx, connection: &DbConnection) -> Result<StaffDb> {
    StaffDb::find_by_id(&ctx.0, connection)?.ok_or(Error::StaffSessionMissing)
}

#[axum::debug_handler]
pub async fn get_staff(State(state): State<AppState>) -> Result<Json<Vec<StaffApi>>> {
    Ok(Json(list_staff(&state.connection)?))
}

#[axum::debug_handler]
pub async fn post_staff(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<StaffPost>,
) -> Result<Json<StaffApi>> {
    Ok(Json(payload.create(&state.connection)?))
}

#[axum::debug_handler]
pub async fn patch_staff(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<PasswordReset>,
) -> Result<Json<SuccessResponse>> {
    payload.apply(&id, &state.connection)?;
    tracing::info!("Password reset for staff {id}");
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn delete_staff(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>> {
    StaffDb::delete(&id, &state.connection)?;
    tracing::info!("Deleted staff {id}");
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn get_applications(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ApplicationQuery>,
) -> Result<Json<Vec<ApplicationApi>>> {
    Ok(Json(list_applications(&query, &state.connection)?))
}

#[axum::debug_handler]
pub async fn post_application(
    State(state): State<AppState>,
    ctx: StaffCtx,
    ApiJson(payload): ApiJson<ApplicationPost>,
) -> Result<Json<ApplicationApi>> {
    let owner = signed_in_staff(ctx, &state.connection)?;
    Ok(Json(payload.submit(owner, &state.connection)?))
}

#[axum::debug_handler]
pub async fn patch_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ApplicationStatusPatch>,
) -> Result<Json<ApplicationApi>> {
    let updated = payload.apply(&id, &state.connection)?;
    tracing::info!("Application {id} marked {}", updated.status);
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn get_attendance(State(state): State<AppState>) -> Result<Json<Vec<AttendanceApi>>> {
    Ok(Json(list_attendance(&state.connection)?))
}

#[axum::debug_handler]
pub async fn post_attendance(
    State(state): State<AppState>,
    ctx: StaffCtx,
    ApiJson(payload): ApiJson<AttendancePost>,
) -> Result<Json<AttendanceApi>> {
    let owner = signed_in_staff(ctx, &state.connection)?;
    Ok(Json(payload.record(owner, &state.connection)?))
}

#[axum::debug_handler]
pub async fn get_department_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentAttendance>>> {
    Ok(Json(department_attendance(&state.connection)?))
}

#[axum::debug_handler]
pub async fn post_seed(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    Ok(Json(seed_sample_staff(&state.connection)?))
}
