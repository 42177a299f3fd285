use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::ParseModeError;

// Tokens are refreshed this long before the service says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
// Longer lifetimes reported by the service are cut down to this.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sandbox,
    Live,
}

impl Mode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mode::Sandbox => "https://api.sandbox.paypal.com",
            Mode::Live => "https://api.paypal.com",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Sandbox
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Sandbox => "sandbox",
            Mode::Live => "live",
        })
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Mode::Sandbox),
            "live" => Ok(Mode::Live),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Credentials and endpoint selection for outbound calls.
///
/// Built once at startup and shared; the only state it mutates is the cached
/// OAuth access token.
pub struct ApiContext {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    mode: Mode,
    endpoint: Option<String>,
    request_id: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl Debug for ApiContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("client_id", &self.client_id)
            .field("mode", &self.mode)
            .field("base_url", &self.base_url())
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

impl ApiContext {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, mode: Mode) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            mode,
            endpoint: None,
            request_id: None,
            token: Mutex::new(None),
        }
    }

    /// Overrides the base url implied by the mode.
    #[must_use]
    pub fn endpoint(self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: Some(endpoint.trim_end_matches('/').to_string()),
            ..self
        }
    }

    /// Fixes the idempotency key sent with every call made through this
    /// context. Without one a fresh key is generated per call.
    #[must_use]
    pub fn request_id(self, request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..self
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.as_deref().unwrap_or_else(|| self.mode.endpoint())
    }

    pub(crate) fn next_request_id(&self) -> String {
        self.request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }

    pub(crate) fn cached_token(&self) -> Option<String> {
        self.token
            .lock()
            .as_ref()
            .filter(|token| Instant::now() < token.expires_at)
            .map(|token| token.value.clone())
    }

    pub(crate) fn store_token(&self, value: String, expires_in: Duration) {
        *self.token.lock() = Some(CachedToken {
            value,
            expires_at: Instant::now()
                + expires_in
                    .min(MAX_TOKEN_LIFETIME)
                    .saturating_sub(TOKEN_EXPIRY_MARGIN),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode() {
        assert_eq!("sandbox".parse::<Mode>().unwrap(), Mode::Sandbox);
        assert_eq!("LIVE".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!(
            "production".parse::<Mode>(),
            Err(ParseModeError("production".to_string()))
        );
        assert_eq!(Mode::Live.to_string(), "live");
    }

    #[test]
    fn base_url() {
        let context = ApiContext::new("id", "secret", Mode::Sandbox);
        assert_eq!(context.base_url(), "https://api.sandbox.paypal.com");

        let context = ApiContext::new("id", "secret", Mode::Live);
        assert_eq!(context.base_url(), "https://api.paypal.com");

        let context = context.endpoint("http://127.0.0.1:9000/");
        assert_eq!(context.base_url(), "http://127.0.0.1:9000");
        assert_eq!(context.mode(), Mode::Live);
    }

    #[test]
    fn request_ids() {
        let context = ApiContext::new("id", "secret", Mode::Sandbox);
        assert_ne!(context.next_request_id(), context.next_request_id());

        let context = context.request_id("fixed");
        assert_eq!(context.next_request_id(), "fixed");
        assert_eq!(context.next_request_id(), "fixed");
    }

    #[test]
    fn token_cache() {
        let context = ApiContext::new("id", "secret", Mode::Sandbox);
        assert_eq!(context.cached_token(), None);

        context.store_token("A21AA".to_string(), Duration::from_secs(3600));
        assert_eq!(context.cached_token().as_deref(), Some("A21AA"));

        // Inside the refresh margin counts as expired.
        context.store_token("short".to_string(), Duration::from_secs(30));
        assert_eq!(context.cached_token(), None);
    }

    #[test]
    fn token_cache_huge_lifetime() {
        let context = ApiContext::new("id", "secret", Mode::Sandbox);
        context.store_token("forever".to_string(), Duration::from_secs(u64::MAX));
        assert_eq!(context.cached_token().as_deref(), Some("forever"));

        let expires_at = context.token.lock().as_ref().unwrap().expires_at;
        assert!(expires_at <= Instant::now() + MAX_TOKEN_LIFETIME);
    }

    #[test]
    fn debug_hides_secret() {
        let context = ApiContext::new("id", "top-secret", Mode::Sandbox);
        assert!(!format!("{:?}", context).contains("top-secret"));
    }
}
