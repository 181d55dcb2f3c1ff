use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::groups_service::GroupsService;
use crate::client::services::session::Session;
use crate::common::models::Group;

#[derive(Debug, Clone, Default)]
pub struct GroupsScreen {
    pub state: LoadState<Vec<Group>>,
    pub new_group_name: String,
}

impl GroupsScreen {
    /// Trimmed name, or `None` when there is nothing to submit.
    pub fn pending_name(&self) -> Option<String> {
        let name = self.new_group_name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

impl Screen for GroupsScreen {
    type Data = Vec<Group>;

    fn title(&self) -> String {
        "Groups".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading groups..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::new("No groups yet")
    }

    fn state(&self) -> &LoadState<Vec<Group>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<Group>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<Group>, ApiError>> {
        async move { GroupsService::list(&session).await }.boxed()
    }

    fn rows(&self, data: &Vec<Group>) -> Vec<Row> {
        data.iter().map(|g| Row::new(g.group_name.clone())).collect()
    }
}
