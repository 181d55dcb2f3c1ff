use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::friends_service::FriendsService;
use crate::client::services::session::Session;
use crate::common::models::UserProfile;

#[derive(Debug, Clone, Default)]
pub struct FriendsScreen {
    pub state: LoadState<Vec<UserProfile>>,
}

impl Screen for FriendsScreen {
    type Data = Vec<UserProfile>;

    fn title(&self) -> String {
        "Friends".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading friends..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::with_body("No friends yet", "Send and accept friend requests to see them here.")
    }

    fn error_lines(&self, error: &str) -> Vec<String> {
        vec![format!("Could not load friends: {}", error)]
    }

    fn state(&self) -> &LoadState<Vec<UserProfile>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<UserProfile>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<UserProfile>, ApiError>> {
        async move { FriendsService::friends(&session).await }.boxed()
    }

    fn rows(&self, data: &Vec<UserProfile>) -> Vec<Row> {
        data.iter()
            .map(|u| Row::new(u.display_name().to_string()).line(u.user_email.clone()))
            .collect()
    }
}
