//! Delegated token validation: one `GET /api/v1/auth/me` per call, no retries, no caching.
//!
//! Every transport or protocol fault is folded into [`ValidationOutcome::UpstreamUnavailable`];
//! callers never see a `reqwest::Error`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::outcome::ValidationOutcome;
use super::types::{Credential, Identity};

/// Route of the identity service that resolves a bearer token into a user record.
/// Relative so that a path prefix on the configured base URL is kept.
pub const IDENTITY_ME_PATH: &str = "api/v1/auth/me";

/// Turns a credential into a [`ValidationOutcome`].
///
/// Implementations must be safe to share across concurrent requests and must not keep
/// per-request state.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, credential: &Credential) -> ValidationOutcome;
}

/// [`TokenValidator`] backed by the identity (admin) service over HTTP.
///
/// The `reqwest::Client` is owned by the process and injected; clones share one pool.
/// It must not follow redirects (see [`HttpTokenValidator::client_builder`]): a 3xx is an
/// unexpected status, not a second request.
#[derive(Clone, Debug)]
pub struct HttpTokenValidator {
    client: reqwest::Client,
    me_url: Url,
    timeout: Duration,
}

impl HttpTokenValidator {
    /// Client settings for the identity service. Redirects are disabled.
    pub fn client_builder() -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
    }

    pub fn new(
        client: reqwest::Client,
        base_url: &Url,
        timeout: Duration,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            me_url: me_endpoint(base_url)?,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.me_url
    }
}

fn me_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(IDENTITY_ME_PATH)
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, credential: &Credential) -> ValidationOutcome {
        let response = match self
            .client
            .get(self.me_url.clone())
            .bearer_auth(credential.as_str())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    "identity service request failed"
                );
                return ValidationOutcome::UpstreamUnavailable;
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<Identity>().await {
                Ok(identity) => ValidationOutcome::Authenticated(identity),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "identity service returned an unreadable user record"
                    );
                    ValidationOutcome::UpstreamUnavailable
                }
            },
            StatusCode::UNAUTHORIZED => {
                tracing::debug!("identity service rejected the credential");
                ValidationOutcome::Unauthenticated
            }
            status => {
                tracing::warn!(%status, "unexpected status from identity service");
                ValidationOutcome::UpstreamUnavailable
            }
        }
    }
}
