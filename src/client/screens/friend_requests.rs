use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::friends_service::FriendsService;
use crate::client::services::session::Session;
use crate::common::models::{FriendshipAction, PendingRequest};

/// (title, body) shown after responding to a request.
pub fn response_alert(action: FriendshipAction) -> (&'static str, &'static str) {
    match action {
        FriendshipAction::Accept => ("Friend added", "You are now friends!"),
        FriendshipAction::Reject => ("Request rejected", "You rejected this friend request."),
    }
}

#[derive(Debug, Clone, Default)]
pub struct FriendRequestsScreen {
    pub state: LoadState<Vec<PendingRequest>>,
    /// Friendship currently being answered; at most one at a time.
    pub acting_on: Option<i64>,
}

impl FriendRequestsScreen {
    /// Accept or Reject on `friendship_id`. False while another response is
    /// in flight or when the request is not listed.
    pub fn press_respond(&mut self, friendship_id: i64) -> bool {
        if self.acting_on.is_some() {
            return false;
        }
        let listed = self.state.data().is_some_and(|r| r.iter().any(|r| r.friendship.id == friendship_id));
        if listed {
            self.acting_on = Some(friendship_id);
        }
        listed
    }

    pub fn response_finished(&mut self) {
        self.acting_on = None;
    }

    /// Drop a request once it has been answered.
    pub fn remove(&mut self, friendship_id: i64) {
        if let Some(requests) = self.state.data_mut() {
            requests.retain(|r| r.friendship.id != friendship_id);
        }
    }
}

impl Screen for FriendRequestsScreen {
    type Data = Vec<PendingRequest>;

    fn title(&self) -> String {
        "Friend Requests".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading friend requests..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::new("No pending friend requests")
    }

    fn state(&self) -> &LoadState<Vec<PendingRequest>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<PendingRequest>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<PendingRequest>, ApiError>> {
        async move { FriendsService::pending_with_users(&session).await }.boxed()
    }

    fn rows(&self, data: &Vec<PendingRequest>) -> Vec<Row> {
        data.iter()
            .map(|r| {
                let row = Row::new(r.display_name().to_string());
                if r.email().is_empty() { row } else { row.line(r.email().to_string()) }
            })
            .collect()
    }
}
