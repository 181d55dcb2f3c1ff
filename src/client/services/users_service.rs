use futures_util::future::try_join_all;
use log::{info, warn};

use crate::client::services::api_client::ApiError;
use crate::client::services::session::Session;
use crate::common::models::UserProfile;

/// Outcome of `DELETE /api/users/account`, mapped to the alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountDeletion {
    Deleted,
    Unauthorized,
    NotFound,
    Failed(String),
}

impl AccountDeletion {
    /// (title, body)
    pub fn alert(&self) -> (&'static str, String) {
        match self {
            AccountDeletion::Deleted => ("Account deleted", "Your account has been deleted.".to_string()),
            AccountDeletion::Unauthorized => (
                "Session expired",
                "Please sign in again before deleting your account.".to_string(),
            ),
            AccountDeletion::NotFound => ("Account not found", "This account no longer exists.".to_string()),
            AccountDeletion::Failed(reason) => ("Error", format!("Could not delete account: {}", reason)),
        }
    }
}

#[derive(Debug, Default)]
pub struct UsersService;

impl UsersService {
    pub async fn me(session: &Session) -> Result<UserProfile, ApiError> {
        session.profile().await
    }

    pub async fn list_all(session: &Session) -> Result<Vec<UserProfile>, ApiError> {
        session.api().get_json("/api/users").await
    }

    pub async fn get(session: &Session, user_id: i64) -> Result<UserProfile, ApiError> {
        session.api().get_json(&format!("/api/users/{}", user_id)).await
    }

    /// Fan-out over `ids`; the first failure fails the whole batch.
    pub async fn get_many(session: &Session, ids: &[i64]) -> Result<Vec<UserProfile>, ApiError> {
        try_join_all(ids.iter().map(|id| Self::get(session, *id))).await
    }

    /// Deletes the account and, on success, ends the session.
    pub async fn delete_account(session: &Session) -> AccountDeletion {
        match session.api().delete("/api/users/account").await {
            Ok(()) => {
                info!("[USERS] Account deleted");
                if let Err(e) = session.sign_out().await {
                    warn!("[USERS] Account deleted but local sign-out failed: {}", e);
                }
                AccountDeletion::Deleted
            }
            Err(ApiError::NotAuthenticated) => AccountDeletion::Unauthorized,
            Err(e) => match e.status() {
                Some(401) => AccountDeletion::Unauthorized,
                Some(404) => AccountDeletion::NotFound,
                _ => {
                    warn!("[USERS] Account deletion failed: {}", e);
                    AccountDeletion::Failed(e.to_string())
                }
            },
        }
    }
}
