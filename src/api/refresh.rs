use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use reqwest::{Client, header};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{
    SessionExpiredNotifier, TokenStore,
    store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY},
};
use crate::types::{RefreshRequest, RefreshResponse};

/// Relative path of the token refresh endpoint.
pub const REFRESH_ENDPOINT: &str = "/auth/refresh/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A usable access token, either freshly issued or issued by a concurrent
    /// refresh this caller waited on.
    Refreshed(String),

    /// The session is over; tokens are cleared and the notifier has fired.
    Expired,
}

/// Single-flight access token renewal.
///
/// At most one refresh request is in flight. Every completed refresh, whether
/// it renewed the token or ended the session, bumps a generation counter under
/// the guard. A caller whose request was sent before the current generation
/// reuses that outcome instead of issuing its own request, so concurrent 401s
/// cause one refresh and at most one session-expired notification.
pub struct Refresher {
    http: Client,
    refresh_url: String,
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn SessionExpiredNotifier>,
    guard: Mutex<()>,
    generation: AtomicU64,
}

impl Refresher {
    pub fn new(
        http: Client,
        base_url: &str,
        store: Arc<dyn TokenStore>,
        notifier: Arc<dyn SessionExpiredNotifier>,
    ) -> Self {
        Self {
            http,
            refresh_url: format!("{base_url}{REFRESH_ENDPOINT}"),
            store,
            notifier,
            guard: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of refreshes completed so far. Read before sending a request and
    /// hand it back to [`Refresher::refresh`] if that request gets a 401.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Renews the access token after a request sent with `stale` at
    /// `generation` got a 401.
    pub async fn refresh(&self, stale: Option<&str>, generation: u64) -> RefreshOutcome {
        let _guard = self.guard.lock().await;

        if self.generation() != generation {
            log::debug!("refresh already completed while the request was in flight");
            return match self.store.get(ACCESS_TOKEN_KEY).await {
                Some(current) => RefreshOutcome::Refreshed(current),
                None => RefreshOutcome::Expired,
            };
        }

        match (self.store.get(ACCESS_TOKEN_KEY).await, stale) {
            (Some(current), _) if Some(current.as_str()) != stale => {
                log::debug!("access token already renewed by a concurrent refresh");
                return RefreshOutcome::Refreshed(current);
            }
            (None, Some(_)) => {
                log::debug!("session already terminated by a concurrent refresh");
                return RefreshOutcome::Expired;
            }
            _ => {}
        }

        let outcome = match self.request_access_token().await {
            Some(access) => {
                if let Err(e) = self.store.set(ACCESS_TOKEN_KEY, &access).await {
                    log::warn!("refreshed access token could not be persisted: {e}");
                }
                RefreshOutcome::Refreshed(access)
            }
            None => {
                self.terminate().await;
                RefreshOutcome::Expired
            }
        };

        self.generation.fetch_add(1, Ordering::SeqCst);
        outcome
    }

    /// Issues the refresh request. Never mutates the store and never retries.
    async fn request_access_token(&self) -> Option<String> {
        let Some(refresh) = self.store.get(REFRESH_TOKEN_KEY).await else {
            log::debug!("no refresh token stored, skipping refresh request");
            return None;
        };

        log::debug!("refreshing access token");
        let response = self
            .http
            .post(&self.refresh_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&RefreshRequest { refresh })
            .send()
            .await;

        let response = match response {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                log::info!("token refresh rejected with status {}", resp.status());
                return None;
            }
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                return None;
            }
        };

        let body: Value = response.json().await.ok()?;
        match serde_json::from_value::<RefreshResponse>(body) {
            Ok(RefreshResponse { access }) => Some(access),
            Err(e) => {
                log::warn!("token refresh response has no access token: {e}");
                None
            }
        }
    }

    async fn terminate(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.clear(key).await {
                log::warn!("failed to clear {key}: {e}");
            }
        }
        self.notifier.session_expired();
    }
}
