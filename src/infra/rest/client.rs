use std::time::{Duration, Instant};

use metrics::histogram;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::config::ApiSettings;
use crate::infra::auth::TokenStore;

use super::envelope::{Payload, decode_payload};
use super::error::ApiError;
use super::request::{ApiRequest, RequestBody};

const METRIC_HTTP_REQUEST_MS: &str = "mealdesk_http_request_ms";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport shared by every resource definition.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, tokens: TokenStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            base: normalize_base(settings.base_url.clone()),
            tokens,
        })
    }

    /// Client with default transport settings against `base`.
    pub fn with_base(base: &str, tokens: TokenStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: normalize_base(Url::parse(base)?),
            tokens,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("mealdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(ApiError::from)
    }

    fn auth_header(&self) -> Result<HeaderValue, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::Unauthenticated)?;
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| ApiError::invalid_request(format!("unusable token: {err}")))
    }

    /// Perform one request and decode its envelope.
    pub async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            authenticated,
        } = request;

        let mut url = self.url(&path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if authenticated {
            builder = builder.header(AUTHORIZATION, self.auth_header()?);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_form()?),
        };

        let started = Instant::now();
        let result = builder.send().await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_HTTP_REQUEST_MS, "method" => method.to_string()).record(elapsed_ms);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, path = %path, error = %err, "request failed without a response");
                return Err(ApiError::from(err));
            }
        };

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "request completed"
        );

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &bytes));
        }
        decode_payload(&bytes)
    }
}

/// `Url::join` drops the last segment unless the base ends with a slash.
fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_slash_keeps_prefix() {
        let client =
            ApiClient::with_base("http://localhost:5000/api/v1", TokenStore::in_memory())
                .expect("client");
        let url = client.url("meal-plans/42").expect("url");
        assert_eq!(url.as_str(), "http://localhost:5000/api/v1/meal-plans/42");
    }

    #[test]
    fn leading_slash_does_not_escape_prefix() {
        let client = ApiClient::with_base("http://localhost/api/", TokenStore::in_memory())
            .expect("client");
        let url = client.url("/faqs").expect("url");
        assert_eq!(url.as_str(), "http://localhost/api/faqs");
    }

    #[test]
    fn auth_header_requires_a_token() {
        let client = ApiClient::with_base("http://localhost/", TokenStore::in_memory())
            .expect("client");
        assert_eq!(client.auth_header(), Err(ApiError::Unauthenticated));

        let client = ApiClient::with_base("http://localhost/", TokenStore::with_token("abc"))
            .expect("client");
        let header = client.auth_header().expect("header");
        assert_eq!(header.to_str().expect("ascii"), "Bearer abc");
    }

    #[tokio::test]
    async fn unauthenticated_request_fails_before_sending() {
        let client =
            ApiClient::with_base("http://127.0.0.1:9/", TokenStore::in_memory()).expect("client");
        let err = client
            .send(ApiRequest::get("meal-plans"))
            .await
            .expect_err("needs token");
        assert_eq!(err, ApiError::Unauthenticated);
    }
}
