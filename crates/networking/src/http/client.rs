//! HTTP client shared by every outbound call
//!
//! Each logical request is retried according to a [`RetryPolicy`]; the
//! optional SOCKS proxy and the request timeout live on the underlying
//! `reqwest::Client`, so every attempt goes through them.

use super::retry::{run_with_retry, FixedRetry, RetryPolicy};
use hoyo_core::{AppConfig, Error, Result};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Method, Proxy,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One logical request; cloned into every attempt
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    /// Name used in logs instead of the URL
    pub label: String,
    /// Return 4xx bodies to the caller instead of retrying them
    pub accept_client_errors: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        let url = url.into();
        let path = url.split('?').next().unwrap_or_default();
        let label = format!("{} {}", method, path);
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            label,
            accept_client_errors: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a header, rejecting names or values that are not valid HTTP
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidData(format!("header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidData(format!("header {}: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// For APIs that explain a 4xx in the body; such answers are final
    pub fn accept_client_errors(mut self) -> Self {
        self.accept_client_errors = true;
        self
    }
}

/// Retrying HTTP client
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    policy: Arc<dyn RetryPolicy>,
}

impl HttpClient {
    /// Client configured from the run settings (proxy, timeout, retries)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.request_timeout);

        if let Some(proxy_url) = config.proxy.url() {
            info!("Routing requests through SOCKS proxy");
            builder = builder.proxy(Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            http: builder.build()?,
            policy: Arc::new(FixedRetry::new(config.max_retry)),
        })
    }

    /// Client without proxy, default timeout and the default policy
    pub fn direct() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            policy: Arc::new(FixedRetry::default()),
        })
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Perform the request, retrying transport failures and non-2xx
    /// statuses, and return the response body as text
    #[instrument(skip(self, request), fields(label = %request.label))]
    pub async fn execute(&self, request: &HttpRequest) -> Result<String> {
        let this = self;
        run_with_retry(self.policy.as_ref(), &request.label, move |attempt| {
            this.send_once(request, attempt)
        })
        .await
    }

    /// Like [`execute`](Self::execute), then decode the body as JSON
    pub async fn execute_json<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T> {
        let body = self.execute(request).await?;
        parse_json(&request.label, &body)
    }

    async fn send_once(&self, request: &HttpRequest, attempt: u32) -> Result<String> {
        debug!("{} (attempt {})", request.label, attempt);

        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() && !(request.accept_client_errors && status.is_client_error()) {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Decode a JSON body, logging a preview when it does not parse
pub fn parse_json<T: DeserializeOwned>(label: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(300).collect();
        error!("Failed to parse {} response: {}. Body preview: {}", label, e, preview);
        Error::InvalidData(e.to_string())
    })
}
