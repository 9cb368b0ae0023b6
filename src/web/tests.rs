//! Router level checks that never reach the database.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use super::{AppState, app};
use crate::auth::admin_token::admin_token;
use crate::auth::staff_session::StaffSessionSigner;
use crate::config::AppConfig;
use crate::db::connection::DbConnection;

const SECRET: &str = "router-test-secret";
const UNREACHABLE_DB: &str = "postgres://trackten@127.0.0.1:1/trackten";

fn config(admin_password: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: String::from(UNREACHABLE_DB),
        bind_address: "127.0.0.1:0".parse().unwrap(),
        admin_password: admin_password.map(String::from),
        staff_session_secret: String::from(SECRET),
        secure_cookies: false,
        static_dir: None,
    }
}

fn router(admin_password: Option<&str>) -> Router {
    let config = config(admin_password);
    let state = AppState::new(&config, DbConnection::lazy(&config.database_url)).unwrap();
    app(state, None)
}

fn staff_cookie() -> String {
    let signer = StaffSessionSigner::new(SECRET).unwrap();
    format!("trackten_staff={}", signer.sign(&Uuid::new_v4().to_string()))
}

fn admin_cookie(password: &str) -> String {
    format!("trackten_admin={}", admin_token(password).unwrap())
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

fn set_cookie(response: &Response) -> String {
    response.headers()[SET_COOKIE].to_str().unwrap().to_string()
}

#[tokio::test]
async fn landing_redirects_guests_to_login() {
    let response = router(Some("secret1"))
        .oneshot(request("GET", "/", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn landing_lets_staff_through() {
    let cookie = staff_cookie();
    let response = router(Some("secret1"))
        .oneshot(request("GET", "/", Some(&cookie), None))
        .await
        .unwrap();
    assert!(!response.status().is_redirection());
}

#[tokio::test]
async fn forged_staff_cookie_is_rejected() {
    let forged = StaffSessionSigner::new("another-secret")
        .unwrap()
        .sign(&Uuid::new_v4().to_string());
    let cookie = format!("trackten_staff={forged}");
    let response = router(None)
        .oneshot(request("GET", "/", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_page_sends_staff_home() {
    let cookie = staff_cookie();
    let response = router(None)
        .oneshot(request("GET", "/login", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn admin_pages_require_the_admin_cookie() {
    let router = router(Some("secret1"));
    let response = router
        .clone()
        .oneshot(request("GET", "/admin/staff", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?mode=admin&from=%2Fadmin%2Fstaff");

    let cookie = admin_cookie("secret1");
    let response = router
        .oneshot(request("GET", "/admin/staff", Some(&cookie), None))
        .await
        .unwrap();
    assert!(!response.status().is_redirection());
}

#[tokio::test]
async fn admin_login_alias_keeps_destination() {
    let response = router(Some("secret1"))
        .oneshot(request("GET", "/admin/login?from=%2Fadmin", None, None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/login?mode=admin&from=%2Fadmin");
}

#[tokio::test]
async fn admin_section_is_open_without_password() {
    let response = router(None)
        .oneshot(request("GET", "/admin", None, None))
        .await
        .unwrap();
    assert!(!response.status().is_redirection());
}

#[tokio::test]
async fn department_attendance_stays_closed_without_password() {
    let response = router(None)
        .oneshot(request(
            "GET",
            "/api/admin/department-attendance",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["message"], "Unauthorized");
}

#[tokio::test]
async fn changed_password_invalidates_admin_cookie() {
    let old = admin_cookie("secret1");
    let response = router(Some("secret2"))
        .oneshot(request("GET", "/admin", Some(&old), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn application_patch_without_admin_is_unauthorized() {
    let uri = format!("/api/applications/{}", Uuid::new_v4());
    let cookie = staff_cookie();
    let response = router(Some("secret1"))
        .oneshot(request(
            "PATCH",
            &uri,
            Some(&cookie),
            Some(r#"{"status":"approved"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"]["message"], "Unauthorized");
}

#[tokio::test]
async fn staff_mutations_without_admin_are_unauthorized() {
    let router = router(Some("secret1"));
    let id = Uuid::new_v4();
    for (method, uri) in [
        ("POST", String::from("/api/staff")),
        ("DELETE", format!("/api/staff/{id}")),
        ("PATCH", format!("/api/staff/{id}")),
        ("GET", String::from("/api/admin/department-attendance")),
    ] {
        let response = router
            .clone()
            .oneshot(request(method, &uri, None, Some("{}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn admin_login_sets_cookie() {
    let response = router(Some("secret1"))
        .oneshot(request(
            "POST",
            "/api/admin/login",
            None,
            Some(r#"{"password":"secret1"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("trackten_admin={}", admin_token("secret1").unwrap())));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert_eq!(json_body(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn admin_login_failures() {
    let router = router(Some("secret1"));
    let response = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/admin/login",
            None,
            Some(r#"{"password":"secret2"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(json_body(response).await["error"]["message"], "Invalid password");

    let response = router
        .oneshot(request("POST", "/api/admin/login", None, Some("not json")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["message"], "Invalid request");
}

#[tokio::test]
async fn admin_login_unconfigured() {
    let response = router(None)
        .oneshot(request(
            "POST",
            "/api/admin/login",
            None,
            Some(r#"{"password":"anything"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Admin login not configured"
    );
}

#[tokio::test]
async fn admin_session_reports_cookie() {
    let router = router(Some("secret1"));
    let cookie = admin_cookie("secret1");
    let response = router
        .clone()
        .oneshot(request("GET", "/api/admin/session", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({ "authenticated": true }));

    let response = router
        .oneshot(request("GET", "/api/admin/session", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "authenticated": false }));
}

#[tokio::test]
async fn staff_session_without_cookie_is_null() {
    let response = router(None)
        .oneshot(request("GET", "/api/auth/staff/session", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "staff": null }));
}

#[tokio::test]
async fn staff_logout_expires_cookie() {
    let response = router(None)
        .oneshot(request("POST", "/api/auth/staff/logout", None, None))
        .await
        .unwrap();
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("trackten_staff=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(json_body(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn staff_login_requires_both_fields() {
    let response = router(None)
        .oneshot(request(
            "POST",
            "/api/auth/staff/login",
            None,
            Some(r#"{"email":"a@x.com"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Email and password are required"
    );
}

#[tokio::test]
async fn staff_only_writes_need_a_session() {
    let router = router(None);
    for uri in ["/api/applications", "/api/attendance"] {
        let response = router
            .clone()
            .oneshot(request("POST", uri, None, Some(r#"{"type":"leave"}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(
            json_body(response).await["error"]["message"],
            "You must be logged in"
        );
    }
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let cookie = admin_cookie("secret1");
    let response = router(Some("secret1"))
        .oneshot(request(
            "DELETE",
            "/api/staff/not-a-uuid",
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
