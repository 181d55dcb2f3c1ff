use url::Url;

use crate::client::config::ClientConfig;
use crate::client::services::oauth::{OAuthError, OAuthFlow, OAuthProvider, OAuthState, PendingExchange};

/// Sign-in screen: provider buttons plus the redirect paste box.
#[derive(Debug, Clone)]
pub struct LoginScreen {
    pub flow: OAuthFlow,
    pub authorize_url: Option<Url>,
    pub redirect_input: String,
    pub notice: Option<String>,
}

impl LoginScreen {
    pub fn new(config: &ClientConfig) -> Self {
        LoginScreen { flow: OAuthFlow::new(config), authorize_url: None, redirect_input: String::new(), notice: None }
    }

    pub fn start(&mut self, provider: OAuthProvider) {
        self.redirect_input.clear();
        match self.flow.begin(provider) {
            Ok(url) => {
                self.authorize_url = Some(url);
                self.notice = None;
            }
            Err(e) => {
                self.authorize_url = None;
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Validates the pasted redirect. On success the caller runs the exchange.
    pub fn submit_redirect(&mut self) -> Option<PendingExchange> {
        match self.flow.complete(&self.redirect_input) {
            Ok(pending) => {
                self.notice = None;
                Some(pending)
            }
            Err(e) => {
                if matches!(self.flow.state(), OAuthState::Idle) {
                    self.authorize_url = None;
                }
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish(&mut self, result: &Result<(), OAuthError>) {
        self.flow.finish(result);
        self.redirect_input.clear();
        self.authorize_url = None;
        self.notice = result.as_ref().err().map(|e| e.to_string());
    }

    pub fn reset(&mut self) {
        self.flow.reset();
        self.authorize_url = None;
        self.redirect_input.clear();
        self.notice = None;
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.flow.state(), OAuthState::ExchangingCode { .. })
    }

    pub fn render(&self) -> Vec<String> {
        let mut out = vec!["EventLink".to_string(), "Sign in to continue".to_string()];
        out.extend(OAuthProvider::ALL.iter().map(|p| p.button_text()));
        if let Some(url) = &self.authorize_url {
            out.push(url.to_string());
        }
        if self.is_busy() {
            out.push("Signing in...".to_string());
        }
        out.extend(self.notice.clone());
        out
    }
}
