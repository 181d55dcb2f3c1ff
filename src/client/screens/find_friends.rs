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
pub struct FindFriendsScreen {
    pub state: LoadState<Vec<UserProfile>>,
    /// Request in flight; all "Add friend" buttons are disabled meanwhile.
    pub sending_to: Option<i64>,
}

impl FindFriendsScreen {
    /// "Add friend" on row `index`. Returns the user to send the request to,
    /// or `None` if the row is unknown or another request is in flight.
    pub fn press_add_friend(&mut self, index: usize) -> Option<i64> {
        if self.sending_to.is_some() {
            return None;
        }
        let user_id = self.state.data()?.get(index)?.user_id;
        self.sending_to = Some(user_id);
        Some(user_id)
    }

    pub fn request_finished(&mut self) {
        self.sending_to = None;
    }
}

impl Screen for FindFriendsScreen {
    type Data = Vec<UserProfile>;

    fn title(&self) -> String {
        "Find Friends".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading users…"
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::with_body("No users to add", "You might already be friends with everyone here.")
    }

    fn state(&self) -> &LoadState<Vec<UserProfile>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<UserProfile>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<UserProfile>, ApiError>> {
        async move { FriendsService::candidates(&session).await }.boxed()
    }

    fn rows(&self, data: &Vec<UserProfile>) -> Vec<Row> {
        data.iter()
            .map(|u| {
                let name = u.user_name.clone().filter(|n| !n.trim().is_empty()).unwrap_or_else(|| "(no name)".to_string());
                Row::new(name).line(u.user_email.clone())
            })
            .collect()
    }
}
