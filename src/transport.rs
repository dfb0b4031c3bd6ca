//! HTTP transport
//!
//! The dispatcher talks to the backend through the [`Transport`] trait so the
//! envelope rules can be exercised without a network. [`HttpTransport`] is
//! the reqwest implementation: it owns the cookie jar and mirrors the CSRF
//! cookie into the CSRF header on mutating requests.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Method, Url,
    cookie::{CookieStore, Jar},
    header::HeaderName,
};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult},
    params::QueryParams,
};

/// One backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the API base, e.g. `admin/problem`
    pub path: String,
    pub method: Method,
    pub params: QueryParams,
    /// JSON body, sent only for methods that carry one
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            params: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Anything other than a plain read
    pub fn is_mutating(&self) -> bool {
        is_mutating(&self.method)
    }
}

/// What came back from the server, whatever the status
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Parsed JSON body; non-JSON text is kept as a string, empty is `None`
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that happen before a response exists
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Request went out (or tried to) but nothing came back
    #[error("no response: {0}")]
    NoResponse(String),

    /// Request could not be constructed
    #[error("request failed: {0}")]
    Request(String),
}

/// Sends one request and returns the raw response
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

pub(crate) fn is_mutating(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: String,
    csrf_header: HeaderName,
    csrf_cookie: String,
}

impl HttpTransport {
    /// Create a transport with its own cookie jar
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base url: {}", e)))?;
        let csrf_header = HeaderName::from_bytes(config.csrf_header_name.as_bytes())
            .map_err(|e| ClientError::Configuration(format!("invalid CSRF header: {}", e)))?;

        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            jar,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_header,
            csrf_cookie: config.csrf_cookie_name.clone(),
        })
    }

    /// Cookie jar shared with the underlying client
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Absolute URL for an API path
    pub fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| TransportError::Request(e.to_string()))
    }

    /// Current CSRF token for `url`, read from the jar
    pub fn csrf_token(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let cookies = header.to_str().ok()?;
        cookie_value(cookies, &self.csrf_cookie)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .query(&request.params.to_pairs());

        if request.is_mutating() {
            if let Some(token) = self.csrf_token(&url) {
                builder = builder.header(self.csrf_header.clone(), token);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::NoResponse(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: decode_body(&bytes),
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Request(err.to_string())
    } else {
        TransportError::NoResponse(err.to_string())
    }
}

fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

/// Pick one cookie out of a `Cookie:` header value
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: "http://judge.test/api/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_joins_paths() {
        let t = transport();
        assert_eq!(
            t.url_for("admin/problem").unwrap().as_str(),
            "http://judge.test/api/admin/problem"
        );
        assert_eq!(
            t.url_for("/admin/assignments/3/").unwrap().as_str(),
            "http://judge.test/api/admin/assignments/3/"
        );
    }

    #[test]
    fn test_csrf_token_from_jar() {
        let t = transport();
        let url = Url::parse("http://judge.test/api/login").unwrap();
        assert_eq!(t.csrf_token(&url), None);

        t.cookie_jar()
            .add_cookie_str("csrftoken=abc123; Path=/", &url);
        t.cookie_jar().add_cookie_str("sessionid=zzz; Path=/", &url);
        assert_eq!(t.csrf_token(&url).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(cookie_value("a=1; csrftoken=x", "csrftoken").as_deref(), Some("x"));
        assert_eq!(cookie_value("a=1", "csrftoken"), None);
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(b""), None);
        assert_eq!(decode_body(b"  \n"), None);
        assert_eq!(decode_body(br#"{"error":null}"#), Some(json!({"error": null})));
        assert_eq!(decode_body(b"Bad Gateway"), Some(json!("Bad Gateway")));
    }

    #[test]
    fn test_mutating_methods() {
        assert!(!ApiRequest::get("problem").is_mutating());
        assert!(ApiRequest::post("submission").is_mutating());
        assert!(ApiRequest::delete("sessions").is_mutating());
        assert!(ApiRequest::put("profile").is_mutating());
    }

    #[test]
    fn test_invalid_config() {
        let bad = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(HttpTransport::new(&bad).is_err());
    }
}
