//! HTTP connection a service performs its calls through.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::{Body, Error, Response};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around a `reqwest::Client` bound to a base URL.
///
/// Every request is logged through `tracing` and its outcome is returned
/// as a [`Response`] whatever the status code, unless the connection was
/// built with `raise_for_status`, in which case 4xx and 5xx answers come back
/// as [`Error::Status`].
#[derive(Clone, Debug)]
pub struct Connection {
    base_url: Url,
    client: reqwest::Client,
    raise_for_status: bool,
}

/// Builder for [`Connection`].
#[derive(Debug)]
pub struct ConnectionBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    raise_for_status: bool,
    headers: Vec<(String, String)>,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            raise_for_status: false,
            headers: Vec::new(),
        }
    }
}

impl ConnectionBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Turn 4xx and 5xx statuses into [`Error::Status`] instead of plain responses.
    pub fn raise_for_status(mut self, enabled: bool) -> Self {
        self.raise_for_status = enabled;
        self
    }

    /// Adds a default header sent with every request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Result<Connection, Error> {
        let base_url = Url::parse(&self.base_url)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Skipping invalid default header {}", name),
            }
        }
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Build(e)
            })?;
        Ok(Connection {
            base_url,
            client,
            raise_for_status: self.raise_for_status,
        })
    }
}

impl Connection {
    /// Creates a connection with default settings against `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::default()
    }

    /// Builder configured from `APICALL_BASE_URL`, `APICALL_TIMEOUT_SECS`
    /// and `APICALL_USER_AGENT`. Unparseable values fall back to defaults.
    pub fn builder_from_env() -> ConnectionBuilder {
        let mut builder = Self::builder()
            .base_url(
                &std::env::var("APICALL_BASE_URL").unwrap_or_else(|_| "http://localhost".into()),
            )
            .timeout(Duration::from_secs(env_u64(
                "APICALL_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )));
        if let Ok(user_agent) = std::env::var("APICALL_USER_AGENT") {
            builder = builder.user_agent(&user_agent);
        }
        builder
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL. Absolute URLs are used as-is.
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(format!("{}/{}", base, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, Error> {
        self.request::<()>(Method::GET, path, query, None).await
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.request::<()>(Method::DELETE, path, &[], None).await
    }

    /// Sends a request and reads the whole body.
    pub async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        json: Option<&B>,
    ) -> Result<Response, Error> {
        let url = self.url_for(path)?;
        tracing::debug!("{} {}", method, url);

        let mut req = self.client.request(method.clone(), url.clone()).query(query);
        if let Some(body) = json {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", method, url, e);
            Error::from_reqwest(e)
        })?;

        let status = resp.status();
        let raw = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::from_reqwest(e)
        })?;
        tracing::debug!("{} {} -> {}: {}", method, url, status, truncate_body(&raw));

        let response = Response::new(status.as_u16(), Body::parse(&raw));
        if self.raise_for_status && (status.is_client_error() || status.is_server_error()) {
            tracing::warn!("{} {} failed with status {}", method, url, status);
            return Err(Error::Status(response));
        }
        Ok(response)
    }
}

fn default_user_agent() -> String {
    format!("apicall/{}", env!("CARGO_PKG_VERSION"))
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_path() {
        let conn = Connection::new("https://api.example.com/v1/").unwrap();
        assert_eq!(
            conn.url_for("/users/1").unwrap().as_str(),
            "https://api.example.com/v1/users/1"
        );
        assert_eq!(
            conn.url_for("users").unwrap().as_str(),
            "https://api.example.com/v1/users"
        );
    }

    #[test]
    fn url_for_keeps_absolute_urls() {
        let conn = Connection::new("https://api.example.com").unwrap();
        assert_eq!(
            conn.url_for("http://other.example.com/ping").unwrap().as_str(),
            "http://other.example.com/ping"
        );
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            Connection::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(2500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }

    #[test]
    fn truncate_short_body() {
        assert_eq!(truncate_body("ok"), "ok");
    }

    #[test]
    fn env_u64_falls_back() {
        assert_eq!(env_u64("APICALL_TEST_UNSET_VARIABLE", 7), 7);
    }
}
