use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Thin JSON client bound to one server and one cookie jar.
pub struct ApiClient {
    pub url: String,
    pub client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: String) -> Self {
        let client = reqwest::ClientBuilder::new()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build reqwest Client");
        Self { url, client }
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.url)
    }

    pub async fn send(&self, method: Method, endpoint: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.client.request(method, self.path(endpoint));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.expect("Failed to send http request");
        let status = response.status();
        let text = response.text().await.expect("Failed to get response text");
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).expect("Couldn't Parse Value")
        };
        (status, value)
    }

    pub async fn get(&self, endpoint: &str) -> (StatusCode, Value) {
        self.send(Method::GET, endpoint, None).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, endpoint, Some(body)).await
    }

    pub async fn patch(&self, endpoint: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, endpoint, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, endpoint, None).await
    }

    /// Status and `Location` of a page request; redirects are not followed.
    pub async fn page(&self, endpoint: &str) -> (StatusCode, Option<String>) {
        let response = self
            .client
            .get(self.path(endpoint))
            .send()
            .await
            .expect("Failed to send http request");
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        (response.status(), location)
    }
}
