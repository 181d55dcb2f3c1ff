mod support;

use serde_json::json;

use eventlink::client::config::ClientConfig;
use eventlink::client::services::oauth::{OAuthError, OAuthFlow, OAuthProvider, OAuthState};
use eventlink::common::pkce::challenge_for;

use support::MockBackend;

fn flow(backend: &MockBackend) -> OAuthFlow {
    let base = backend.base_url.clone();
    OAuthFlow::new(&ClientConfig::from_lookup(move |key| match key {
        "API_BASE_URL" => Some(base.clone()),
        "GITHUB_CLIENT_ID" => Some("gh".to_string()),
        "GOOGLE_CLIENT_ID" => Some("goog".to_string()),
        _ => None,
    }))
}

fn redirect_for(url: &url::Url, code: &str) -> String {
    let state = url.query_pairs().find(|(k, _)| k == "state").map(|(_, v)| v.into_owned()).unwrap();
    format!("http://localhost:8081/LoginPage?code={}&state={}", code, state)
}

#[tokio::test]
async fn github_code_is_exchanged_once_and_token_persisted() {
    let backend = MockBackend::start().await;
    backend.mock("POST", "/oauth2/callbackGithub", 200, json!({ "token": "issued-jwt" }));
    backend.mock("GET", "/api/users/profile", 200, json!({ "userId": 10, "userName": "Sam" }));
    let session = backend.session(false);

    let mut flow = flow(&backend);
    let url = flow.begin(OAuthProvider::GitHub).unwrap();
    let challenge = url.query_pairs().find(|(k, _)| k == "code_challenge").map(|(_, v)| v.into_owned()).unwrap();

    let pending = flow.complete(&redirect_for(&url, "auth-code")).unwrap();
    let result = pending.exchange(&session).await;
    flow.finish(&result);

    assert_eq!(flow.state(), &OAuthState::Authenticated);
    assert!(session.is_authenticated());
    assert_eq!(session.api().tokens().get_token().as_deref(), Some("issued-jwt"));

    let exchanges = backend.requests_to("POST", "/oauth2/callbackGithub");
    assert_eq!(exchanges.len(), 1);
    let body = exchanges[0].body.clone().unwrap();
    assert_eq!(body["code"], "auth-code");
    let verifier = body["codeVerifier"].as_str().unwrap();
    assert_eq!(challenge_for(verifier), challenge);
    assert_eq!(exchanges[0].authorization, None);

    // profile warmed with the new token
    let profile = &backend.requests_to("GET", "/api/users/profile")[0];
    assert_eq!(profile.authorization.as_deref(), Some("Bearer issued-jwt"));
}

#[tokio::test]
async fn google_uses_the_generic_callback() {
    let backend = MockBackend::start().await;
    backend.mock("POST", "/oauth2/callback", 200, json!({ "token": "g-jwt" }));
    let session = backend.session(false);

    let mut flow = flow(&backend);
    let url = flow.begin(OAuthProvider::Google).unwrap();
    assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    flow.complete(&redirect_for(&url, "g-code")).unwrap().exchange(&session).await.unwrap();

    assert_eq!(backend.requests_to("POST", "/oauth2/callback").len(), 1);
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn rejected_exchange_persists_nothing() {
    let backend = MockBackend::start().await;
    backend.mock("POST", "/oauth2/callbackGithub", 400, json!({ "error": "bad_verification_code" }));
    let session = backend.session(false);

    let mut flow = flow(&backend);
    let url = flow.begin(OAuthProvider::GitHub).unwrap();
    let result = flow.complete(&redirect_for(&url, "stale")).unwrap().exchange(&session).await;
    assert!(matches!(result, Err(OAuthError::Exchange(_))));
    flow.finish(&result);

    assert!(matches!(flow.state(), OAuthState::Failed(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn cancelled_sign_in_never_calls_the_backend() {
    let backend = MockBackend::start().await;
    let mut flow = flow(&backend);
    flow.begin(OAuthProvider::GitHub).unwrap();

    let result = flow.complete("http://localhost:8081/LoginPage?error=access_denied&state=whatever");
    assert_eq!(result.err(), Some(OAuthError::Cancelled));
    assert_eq!(flow.state(), &OAuthState::Idle);
    assert!(backend.requests().is_empty());
}
