use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;
use uuid::Uuid;

use super::{
    AppState,
    gate::{AdminStatus, Session},
};
use crate::auth::{ADMIN_COOKIE, STAFF_COOKIE};
use crate::prelude::*;

/// Sessions resolved from the request cookies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    pub staff_id: Option<Uuid>,
    pub admin: AdminStatus,
}

/// The signed-in staff member's id; rejects with 401 when absent.
#[derive(Clone, Copy, Debug)]
pub struct StaffCtx(pub Uuid);

impl Ctx {
    pub fn resolve(state: &AppState, cookies: &Cookies) -> Self {
        let staff_id = cookies
            .get(STAFF_COOKIE)
            .and_then(|cookie| state.staff_sessions.verify(cookie.value()))
            .and_then(|id| Uuid::parse_str(&id).ok());

        let admin = if !state.admin.is_configured() {
            AdminStatus::Open
        } else if state
            .admin
            .verify(cookies.get(ADMIN_COOKIE).as_ref().map(|c| c.value()))
        {
            AdminStatus::Authenticated
        } else {
            AdminStatus::Anonymous
        };

        Self { staff_id, admin }
    }

    pub fn session(&self) -> Session {
        Session {
            staff: self.staff_id.is_some(),
            admin: self.admin,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::CtxMissing)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for StaffCtx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let ctx = Ctx::from_request_parts(parts, state).await?;
        ctx.staff_id.map(StaffCtx).ok_or(Error::StaffSessionMissing)
    }
}
