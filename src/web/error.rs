use crate::prelude::*;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidRequest | Error::Validation(_) => StatusCode::BAD_REQUEST,

            Error::WrongCredentials
            | Error::WrongAdminPassword
            | Error::AdminUnauthorized
            | Error::StaffSessionMissing => StatusCode::UNAUTHORIZED,

            Error::NotFound | Error::Diesel(diesel::result::Error::NotFound) => {
                StatusCode::NOT_FOUND
            }
            Error::Conflict(_) => StatusCode::CONFLICT,

            Error::AdminNotConfigured
            | Error::IO(_)
            | Error::Json(_)
            | Error::Toml(_)
            | Error::R2D2(_)
            | Error::Diesel(_)
            | Error::Migration(_)
            | Error::HmacKey(_)
            | Error::MissingConfig(_)
            | Error::InvalidConfig { .. }
            | Error::CtxMissing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            Error::AdminNotConfigured => self.to_string(),
            // Internal errors - hide details
            _ if status.is_server_error() => {
                tracing::error!("Request failed: {self:?}");
                String::from("Internal server error")
            }
            Error::Diesel(diesel::result::Error::NotFound) => String::from("Not found"),
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        tracing::debug!("Rejected body: {value}");
        Error::InvalidRequest
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        tracing::debug!("Rejected query: {value}");
        Error::InvalidRequest
    }
}

impl From<PathRejection> for Error {
    fn from(value: PathRejection) -> Self {
        tracing::debug!("Rejected path: {value}");
        Error::InvalidRequest
    }
}
