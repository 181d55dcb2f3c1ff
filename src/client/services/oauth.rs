use std::fmt;

use log::{info, warn};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::client::services::api_client::ApiError;
use crate::client::services::session::Session;
use crate::common::models::{OAuthCodeExchange, OAuthTokenResponse};
use crate::common::pkce::{PkcePair, CHALLENGE_METHOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 2] = [OAuthProvider::GitHub, OAuthProvider::Google];

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::GitHub => "GitHub",
        }
    }

    pub fn authorize_endpoint(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            OAuthProvider::GitHub => "https://github.com/login/oauth/authorize",
        }
    }

    pub fn scopes(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "openid email profile",
            OAuthProvider::GitHub => "user",
        }
    }

    /// Backend path that trades the authorization code for an app token.
    pub fn exchange_path(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "/oauth2/callback",
            OAuthProvider::GitHub => "/oauth2/callbackGithub",
        }
    }

    pub fn button_text(&self) -> String {
        format!("Sign in with {}", self.label())
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OAuthError {
    #[error("{0} sign-in is not configured")]
    MissingClientId(OAuthProvider),
    #[error("no sign-in in progress")]
    NotStarted,
    #[error("sign-in was cancelled")]
    Cancelled,
    #[error("provider returned an error: {0}")]
    Provider(String),
    #[error("invalid redirect URL: {0}")]
    InvalidRedirect(String),
    #[error("redirect state does not match")]
    StateMismatch,
    #[error("redirect carried no authorization code")]
    MissingCode,
    #[error("token exchange failed: {0}")]
    Exchange(#[from] ApiError),
}

/// Where the sign-in flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthState {
    Idle,
    AwaitingRedirect { provider: OAuthProvider, state: String, verifier: String },
    ExchangingCode { provider: OAuthProvider },
    Authenticated,
    Failed(String),
}

/// Authorization code ready to be traded for a token. Consumed by
/// [`PendingExchange::exchange`], so the code is posted at most once.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingExchange {
    provider: OAuthProvider,
    code: String,
    verifier: String,
}

impl fmt::Debug for PendingExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingExchange")
            .field("provider", &self.provider)
            .field("code", &"(redacted)")
            .field("verifier", &"(redacted)")
            .finish()
    }
}

impl PendingExchange {
    pub fn provider(&self) -> OAuthProvider {
        self.provider
    }

    /// POSTs `{code, codeVerifier}` to the provider's exchange path and
    /// persists the returned token through the session.
    pub async fn exchange(self, session: &Session) -> Result<(), OAuthError> {
        let body = OAuthCodeExchange { code: self.code, code_verifier: Some(self.verifier) };
        let response: OAuthTokenResponse =
            session.api().post_json_public(self.provider.exchange_path(), &body).await?;
        session.sign_in(&response.token).await?;
        info!("[OAUTH] {} sign-in completed", self.provider);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OAuthFlow {
    google_client_id: Option<String>,
    github_client_id: Option<String>,
    redirect_uri: String,
    state: OAuthState,
}

impl OAuthFlow {
    pub fn new(config: &ClientConfig) -> Self {
        OAuthFlow {
            google_client_id: config.google_client_id.clone(),
            github_client_id: config.github_client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            state: OAuthState::Idle,
        }
    }

    pub fn state(&self) -> &OAuthState {
        &self.state
    }

    fn client_id(&self, provider: OAuthProvider) -> Option<&str> {
        match provider {
            OAuthProvider::Google => self.google_client_id.as_deref(),
            OAuthProvider::GitHub => self.github_client_id.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }

    /// Builds the authorize URL and waits for the redirect. Starting again
    /// discards any earlier attempt.
    pub fn begin(&mut self, provider: OAuthProvider) -> Result<Url, OAuthError> {
        let client_id = self.client_id(provider).ok_or(OAuthError::MissingClientId(provider))?;
        let pkce = PkcePair::generate();
        let state = Uuid::new_v4().simple().to_string();

        let mut url = Url::parse(provider.authorize_endpoint())
            .map_err(|e| OAuthError::InvalidRedirect(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", provider.scopes())
            .append_pair("state", &state)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", CHALLENGE_METHOD);

        info!("[OAUTH] Starting {} sign-in", provider);
        self.state = OAuthState::AwaitingRedirect { provider, state, verifier: pkce.verifier };
        Ok(url)
    }

    /// Validates the redirect the provider sent back. Provider errors, a
    /// state mismatch, or a missing code all return the flow to `Idle`.
    pub fn complete(&mut self, redirect_url: &str) -> Result<PendingExchange, OAuthError> {
        let (provider, expected_state, verifier) = match &self.state {
            OAuthState::AwaitingRedirect { provider, state, verifier } => {
                (*provider, state.clone(), verifier.clone())
            }
            _ => return Err(OAuthError::NotStarted),
        };

        let url = Url::parse(redirect_url.trim()).map_err(|e| OAuthError::InvalidRedirect(e.to_string()))?;
        let param = |name: &str| {
            url.query_pairs().find(|(k, _)| k == name).map(|(_, v)| v.into_owned())
        };

        if let Some(error) = param("error") {
            self.state = OAuthState::Idle;
            if error == "access_denied" {
                info!("[OAUTH] {} sign-in cancelled by user", provider);
                return Err(OAuthError::Cancelled);
            }
            warn!("[OAUTH] {} returned error: {}", provider, error);
            return Err(OAuthError::Provider(error));
        }
        if param("state").as_deref() != Some(expected_state.as_str()) {
            warn!("[OAUTH] Redirect state mismatch, discarding");
            self.state = OAuthState::Idle;
            return Err(OAuthError::StateMismatch);
        }
        let code = match param("code").filter(|c| !c.is_empty()) {
            Some(code) => code,
            None => {
                self.state = OAuthState::Idle;
                return Err(OAuthError::MissingCode);
            }
        };

        self.state = OAuthState::ExchangingCode { provider };
        Ok(PendingExchange { provider, code, verifier })
    }

    /// Records the result of [`PendingExchange::exchange`].
    pub fn finish(&mut self, result: &Result<(), OAuthError>) {
        self.state = match result {
            Ok(()) => OAuthState::Authenticated,
            Err(e) => {
                warn!("[OAUTH] Sign-in failed: {}", e);
                OAuthState::Failed(e.to_string())
            }
        };
    }

    pub fn reset(&mut self) {
        self.state = OAuthState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> OAuthFlow {
        let config = ClientConfig::from_lookup(|key| match key {
            "GITHUB_CLIENT_ID" => Some("gh-client".to_string()),
            "OAUTH_REDIRECT_URI" => Some("http://localhost:8081/LoginPage".to_string()),
            _ => None,
        });
        OAuthFlow::new(&config)
    }

    fn awaiting_state(flow: &OAuthFlow) -> String {
        match flow.state() {
            OAuthState::AwaitingRedirect { state, .. } => state.clone(),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn authorize_url_carries_pkce_and_state() {
        let mut flow = flow();
        let url = flow.begin(OAuthProvider::GitHub).unwrap();
        assert!(url.as_str().starts_with("https://github.com/login/oauth/authorize?"));

        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "gh-client");
        assert_eq!(pairs["scope"], "user");
        assert_eq!(pairs["code_challenge_method"], "S256");
        assert_eq!(pairs["state"], awaiting_state(&flow));
        assert_eq!(pairs["code_challenge"].len(), 43);
    }

    #[test]
    fn missing_client_id_is_reported() {
        let mut flow = flow();
        assert_eq!(
            flow.begin(OAuthProvider::Google),
            Err(OAuthError::MissingClientId(OAuthProvider::Google))
        );
        assert_eq!(flow.state(), &OAuthState::Idle);
    }

    #[test]
    fn user_cancellation_returns_to_idle() {
        let mut flow = flow();
        flow.begin(OAuthProvider::GitHub).unwrap();
        let result = flow.complete("http://localhost:8081/LoginPage?error=access_denied");
        assert_eq!(result, Err(OAuthError::Cancelled));
        assert_eq!(flow.state(), &OAuthState::Idle);
    }

    #[test]
    fn state_mismatch_is_rejected() {
        let mut flow = flow();
        flow.begin(OAuthProvider::GitHub).unwrap();
        let result = flow.complete("http://localhost:8081/LoginPage?code=abc&state=forged");
        assert_eq!(result, Err(OAuthError::StateMismatch));
        assert_eq!(flow.state(), &OAuthState::Idle);
    }

    #[test]
    fn valid_redirect_moves_to_exchange() {
        let mut flow = flow();
        flow.begin(OAuthProvider::GitHub).unwrap();
        let state = awaiting_state(&flow);
        let pending = flow
            .complete(&format!("http://localhost:8081/LoginPage?code=abc&state={}", state))
            .unwrap();
        assert_eq!(pending.provider(), OAuthProvider::GitHub);
        assert_eq!(flow.state(), &OAuthState::ExchangingCode { provider: OAuthProvider::GitHub });

        // a second redirect for the same attempt is not accepted
        assert_eq!(
            flow.complete(&format!("http://localhost:8081/LoginPage?code=abc&state={}", state)),
            Err(OAuthError::NotStarted)
        );
    }

    #[test]
    fn redirect_without_begin_is_rejected() {
        let mut flow = flow();
        assert_eq!(flow.complete("http://localhost/?code=x&state=y"), Err(OAuthError::NotStarted));
    }

    #[test]
    fn finish_records_outcome() {
        let mut flow = flow();
        flow.finish(&Err(OAuthError::Exchange(ApiError::Status { status: 400, body: String::new() })));
        assert!(matches!(flow.state(), OAuthState::Failed(_)));
        flow.reset();
        assert_eq!(flow.state(), &OAuthState::Idle);
        flow.finish(&Ok(()));
        assert_eq!(flow.state(), &OAuthState::Authenticated);
    }
}
