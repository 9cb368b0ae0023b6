use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

use super::{
    AppState,
    ctx::Ctx,
    gate::{GateDecision, evaluate},
};
use crate::prelude::*;

/// Resolves the caller's sessions, applies the gate rules and hands the
/// resolved [`Ctx`] to the handlers.
pub async fn mw_route_gate(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = Ctx::resolve(&state, &cookies);
    let decision = evaluate(
        req.method(),
        req.uri().path(),
        req.uri().query(),
        &ctx.session(),
    );

    match decision {
        GateDecision::Allow => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        GateDecision::Redirect(location) => Redirect::temporary(&location).into_response(),
        GateDecision::Unauthorized => Error::AdminUnauthorized.into_response(),
    }
}
