use std::{sync::Arc, time::Duration};

use reqwest::{
    Client, ClientBuilder, Method, Response, StatusCode,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

use super::{
    ApiError, ApiResponse, IgnoreSessionExpiry, MemoryTokenStore, SessionExpiredNotifier,
    TokenStore,
    refresh::{RefreshOutcome, Refresher},
    response::normalize,
    store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY},
};
use crate::{config, types::TokenPair};

/// One call against the API, independent of the token it will be sent with.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Attaches a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Serialization)?);
        Ok(self)
    }

    /// Adds a header value. Caller headers replace the client defaults of the
    /// same name; repeating a name sends every value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Position of a call in its at-most-one-retry lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    RetryAfterRefresh,
}

/// Authenticated client for the EduFlex REST API.
///
/// Injects the stored bearer token, renews it once on `401 Unauthorized` and
/// normalizes every outcome into [`ApiResponse`] or [`ApiError`].
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    refresher: Refresher,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client configured from the environment, persisting tokens in `store`.
    pub fn from_env(store: Arc<dyn TokenStore>) -> ApiClientBuilder {
        Self::builder()
            .base_url(config::api_base_url())
            .timeout(config::request_timeout())
            .token_store(store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, ApiError> {
        self.send(RequestDescriptor::new(Method::GET, endpoint)).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(RequestDescriptor::new(Method::POST, endpoint).json(body)?)
            .await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(RequestDescriptor::new(Method::PUT, endpoint).json(body)?)
            .await
    }

    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(RequestDescriptor::new(Method::PATCH, endpoint).json(body)?)
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse, ApiError> {
        self.send(RequestDescriptor::new(Method::DELETE, endpoint))
            .await
    }

    /// Runs a request through the attempt / refresh / retry cycle.
    ///
    /// The retry after a refresh is terminal: its outcome is normalized and
    /// returned whatever the status, so a second 401 fails the call.
    pub async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let generation = self.refresher.generation();
        let mut access = self.store.get(ACCESS_TOKEN_KEY).await;
        let mut attempt = Attempt::Initial;

        loop {
            let response = self.dispatch(&request, access.as_deref(), attempt).await?;

            if attempt == Attempt::Initial && response.status() == StatusCode::UNAUTHORIZED {
                log::debug!(
                    "{} {} rejected with 401, refreshing",
                    request.method,
                    request.endpoint
                );
                match self.refresher.refresh(access.as_deref(), generation).await {
                    RefreshOutcome::Refreshed(token) => {
                        access = Some(token);
                        attempt = Attempt::RetryAfterRefresh;
                        continue;
                    }
                    RefreshOutcome::Expired => return Err(ApiError::SessionExpired),
                }
            }

            return normalize(response).await;
        }
    }

    async fn dispatch(
        &self,
        request: &RequestDescriptor,
        access: Option<&str>,
        attempt: Attempt,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, request.endpoint);
        let headers = build_headers(&request.headers, access, attempt)?;

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        builder.send().await.map_err(ApiError::Transport)
    }

    pub async fn tokens(&self) -> Option<TokenPair> {
        self.store.pair().await
    }

    pub async fn has_access_token(&self) -> bool {
        self.store.get(ACCESS_TOKEN_KEY).await.is_some()
    }

    /// Replaces the stored pair, e.g. after login or registration.
    pub async fn store_tokens(&self, pair: &TokenPair) {
        for (key, value) in [
            (ACCESS_TOKEN_KEY, &pair.access),
            (REFRESH_TOKEN_KEY, &pair.refresh),
        ] {
            if let Err(e) = self.store.set(key, value).await {
                log::warn!("failed to persist {key}: {e}");
            }
        }
    }

    pub async fn clear_tokens(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.clear(key).await {
                log::warn!("failed to clear {key}: {e}");
            }
        }
    }
}

/// Default headers, then caller headers on top. On the retry the refreshed
/// token replaces any caller-supplied Authorization.
fn build_headers(
    extra: &HeaderMap,
    access: Option<&str>,
    attempt: Attempt,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let authorization = access.map(bearer).transpose()?;
    if let Some(value) = &authorization {
        headers.insert(header::AUTHORIZATION, value.clone());
    }

    for name in extra.keys() {
        headers.remove(name);
    }
    for (name, value) in extra {
        headers.append(name.clone(), value.clone());
    }

    if attempt == Attempt::RetryAfterRefresh {
        if let Some(value) = authorization {
            headers.insert(header::AUTHORIZATION, value);
        }
    }

    Ok(headers)
}

fn bearer(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ApiError::Configuration("stored access token is not a valid header".into()))
}

pub struct ApiClientBuilder {
    base_url: Option<String>,
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn SessionExpiredNotifier>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            store: Arc::new(MemoryTokenStore::new()),
            notifier: Arc::new(IgnoreSessionExpiry),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = store;
        self
    }

    pub fn on_session_expired(mut self, notifier: impl SessionExpiredNotifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Per-request timeout; none by default.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Configuration("base_url is empty".into()));
        }

        let mut client_builder = ClientBuilder::new().user_agent(
            self.user_agent
                .unwrap_or_else(|| format!("eduflexcli/{}", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let http = client_builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let refresher = Refresher::new(
            http.clone(),
            &base_url,
            Arc::clone(&self.store),
            self.notifier,
        );

        Ok(ApiClient {
            http,
            base_url,
            store: self.store,
            refresher,
        })
    }
}
