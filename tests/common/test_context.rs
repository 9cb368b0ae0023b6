use trackten::{
    config::AppConfig,
    db::connection::DbConnection,
    web::{AppState, app},
};

use super::{api_client::ApiClient, db_test_context::DBTestContext};

pub const SESSION_SECRET: &str = "integration-session-secret";

pub struct TestContext {
    pub db: DBTestContext,
    pub base_url: String,
    server: tokio::task::JoinHandle<()>,
}

impl TestContext {
    /// Like `start`, but yields `None` when no database is configured.
    pub async fn try_start(admin_password: Option<&str>) -> Option<Self> {
        if std::env::var("DATABASE_URL").is_err() {
            eprintln!("DATABASE_URL not set, skipping");
            return None;
        }
        Some(Self::start(admin_password).await)
    }

    /// Migrates the database and serves the app on an ephemeral port.
    pub async fn start(admin_password: Option<&str>) -> Self {
        let db = DBTestContext::from_env();
        let config = AppConfig {
            database_url: db.url.clone(),
            bind_address: "127.0.0.1:0".parse().unwrap(),
            admin_password: admin_password.map(String::from),
            staff_session_secret: String::from(SESSION_SECRET),
            secure_cookies: false,
            static_dir: None,
        };
        let connection =
            DbConnection::new(&config.database_url).expect("Failed to create connection pool");
        let state = AppState::new(&config, connection).expect("Failed to build app state");
        let router = app(state, None);

        let listener = tokio::net::TcpListener::bind(config.bind_address)
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            db,
            base_url: format!("http://{addr}"),
            server,
        }
    }

    /// A fresh client with its own cookie jar.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
