//! Route gate rules.
//!
//! Rules are checked top to bottom and the first one whose matcher accepts
//! the request decides the outcome. Each rule is guarded by exactly one
//! session kind.

use axum::http::Method;
use url::form_urlencoded;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// State of the admin cookie for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    /// No admin password is configured; the admin section is open.
    Open,
    Authenticated,
    Anonymous,
}

impl AdminStatus {
    pub fn allows(&self) -> bool {
        matches!(self, AdminStatus::Open | AdminStatus::Authenticated)
    }
}

/// What the gate knows about the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub staff: bool,
    pub admin: AdminStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    /// Page for signed-in staff only.
    StaffPage,
    /// Page that signed-in staff skip.
    GuestPage,
    /// Legacy admin login address.
    AdminLoginAlias,
    AdminPage,
    /// Data-changing API; open when no admin password is configured.
    AdminMutation,
    /// Admin-only reads; always need a valid admin cookie.
    AdminData,
}

struct Rule {
    name: &'static str,
    matches: fn(&Method, &str) -> bool,
    guard: Guard,
}

const RULES: [Rule; 6] = [
    Rule {
        name: "landing",
        matches: is_landing,
        guard: Guard::StaffPage,
    },
    Rule {
        name: "login",
        matches: is_login,
        guard: Guard::GuestPage,
    },
    Rule {
        name: "admin-login",
        matches: is_admin_login,
        guard: Guard::AdminLoginAlias,
    },
    Rule {
        name: "admin-pages",
        matches: is_admin_page,
        guard: Guard::AdminPage,
    },
    Rule {
        name: "admin-mutations",
        matches: is_admin_mutation,
        guard: Guard::AdminMutation,
    },
    Rule {
        name: "admin-data",
        matches: is_admin_data,
        guard: Guard::AdminData,
    },
];

fn is_landing(_: &Method, path: &str) -> bool {
    path == LANDING_PATH
}

fn is_login(_: &Method, path: &str) -> bool {
    path == LOGIN_PATH
}

fn is_admin_login(_: &Method, path: &str) -> bool {
    path == ADMIN_LOGIN_PATH
}

fn is_admin_page(_: &Method, path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

/// The segment after `prefix` when the path is exactly one level deeper.
fn single_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
}

fn is_admin_mutation(method: &Method, path: &str) -> bool {
    if path == "/api/staff" {
        return *method != Method::GET;
    }
    if single_segment(path, "/api/staff/").is_some() {
        return *method == Method::DELETE || *method == Method::PATCH;
    }
    if single_segment(path, "/api/applications/").is_some() {
        return *method == Method::PATCH;
    }
    false
}

fn is_admin_data(_: &Method, path: &str) -> bool {
    match path.strip_prefix("/api/admin/") {
        Some("login" | "session") => false,
        Some(rest) => !rest.is_empty(),
        None => false,
    }
}

/// `/login?mode=admin`, with `from` when a destination is known.
pub fn admin_login_url(from: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("mode", "admin");
    if let Some(from) = from.filter(|f| !f.is_empty()) {
        query.append_pair("from", from);
    }
    format!("{LOGIN_PATH}?{}", query.finish())
}

fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Decides what happens to a request before it reaches a handler.
pub fn evaluate(method: &Method, path: &str, query: Option<&str>, session: &Session) -> GateDecision {
    let Some(rule) = RULES.iter().find(|rule| (rule.matches)(method, path)) else {
        return GateDecision::Allow;
    };

    let decision = match rule.guard {
        Guard::StaffPage if session.staff => GateDecision::Allow,
        Guard::StaffPage => GateDecision::Redirect(String::from(LOGIN_PATH)),
        Guard::GuestPage if session.staff => GateDecision::Redirect(String::from(LANDING_PATH)),
        Guard::GuestPage => GateDecision::Allow,
        Guard::AdminLoginAlias => {
            GateDecision::Redirect(admin_login_url(query_param(query, "from").as_deref()))
        }
        Guard::AdminPage if session.admin.allows() => GateDecision::Allow,
        Guard::AdminPage => GateDecision::Redirect(admin_login_url(Some(path))),
        Guard::AdminMutation if session.admin.allows() => GateDecision::Allow,
        Guard::AdminData if session.admin == AdminStatus::Authenticated => GateDecision::Allow,
        Guard::AdminMutation | Guard::AdminData => GateDecision::Unauthorized,
    };
    tracing::debug!("Gate rule '{}' on {method} {path}: {decision:?}", rule.name);
    decision
}
