use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::client::services::api_client::{ApiClient, ApiError};
use crate::common::models::UserProfile;

#[derive(Debug, Default)]
struct ProfileCache {
    /// Bumped on every sign-in and sign-out; a fetch started under an older
    /// generation is not cached.
    generation: u64,
    profile: Option<UserProfile>,
}

/// Signed-in session: the API client plus the profile fetched once per login.
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    cache: Mutex<ProfileCache>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Session { api, cache: Mutex::new(ProfileCache::default()) }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.tokens().get_token().is_some()
    }

    /// `GET /api/users/profile`, cached until sign-out. The cache lock is
    /// never held across the request.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let generation = {
            let cache = self.cache.lock().await;
            if let Some(profile) = cache.profile.as_ref() {
                return Ok(profile.clone());
            }
            cache.generation
        };

        let profile: UserProfile = self.api.get_json("/api/users/profile").await?;

        let mut cache = self.cache.lock().await;
        if cache.generation == generation {
            info!("[SESSION] Profile loaded for user {}", profile.user_id);
            cache.profile = Some(profile.clone());
        } else {
            debug!("[SESSION] Session changed during profile fetch, not caching");
        }
        Ok(profile)
    }

    pub async fn my_id(&self) -> Result<i64, ApiError> {
        Ok(self.profile().await?.user_id)
    }

    pub async fn cached_profile(&self) -> Option<UserProfile> {
        self.cache.lock().await.profile.clone()
    }

    /// Persist a freshly issued token and warm the profile cache. A failed
    /// warm-up is logged; the profile is fetched lazily later.
    pub async fn sign_in(&self, token: &str) -> Result<(), ApiError> {
        self.invalidate().await;
        self.api.tokens().set_token(token)?;
        info!("[SESSION] Signed in (token redacted)");
        if let Err(e) = self.profile().await {
            warn!("[SESSION] Could not load profile after sign-in: {}", e);
        }
        Ok(())
    }

    /// Local only; never waits on the backend.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.api.tokens().clear_token()?;
        self.invalidate().await;
        info!("[SESSION] Signed out");
        Ok(())
    }

    pub async fn invalidate(&self) {
        let mut cache = self.cache.lock().await;
        cache.generation += 1;
        cache.profile = None;
    }
}
