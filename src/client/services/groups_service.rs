use futures_util::future::try_join_all;
use log::info;

use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::session::Session;
use crate::client::services::users_service::UsersService;
use crate::common::models::{Event, Group, GroupDetails, GroupMembership, NewGroup};

#[derive(Debug, Default)]
pub struct GroupsService;

impl GroupsService {
    pub async fn list(session: &Session) -> Result<Vec<Group>, ApiError> {
        session.api().get_json("/api/groups").await
    }

    /// Creates a group owned by the current user.
    pub async fn create(session: &Session, name: &str) -> Result<Group, ApiError> {
        let user_id = session.my_id().await?;
        let body = NewGroup { group_name: name.trim().to_string(), user_id };
        let group: Group = session.api().post_json("/api/groups", &body).await?;
        info!("[GROUPS] Created group {} ({})", group.group_id, group.group_name);
        Ok(group)
    }

    pub async fn join(session: &Session, group_id: i64) -> Result<(), ApiError> {
        let user_id = session.my_id().await?;
        session.api().post("/api/groupMembers/add", &GroupMembership::new(group_id, user_id)).await?;
        info!("[GROUPS] User {} added to group {}", user_id, group_id);
        Ok(())
    }

    pub async fn event_ids(session: &Session, group_id: i64) -> Result<Vec<i64>, ApiError> {
        session.api().get_json(&format!("/api/groupEvents/{}", group_id)).await
    }

    pub async fn member_ids(session: &Session, group_id: i64) -> Result<Vec<i64>, ApiError> {
        session.api().get_json(&format!("/api/groupMembers/group/{}", group_id)).await
    }

    /// Ids first, then one request per id. Any failure aborts the whole chain.
    pub async fn details(session: &Session, group_id: i64) -> Result<GroupDetails, ApiError> {
        let event_ids = Self::event_ids(session, group_id).await?;
        let events = try_join_all(event_ids.iter().map(|id| EventsService::stored_event(session, *id))).await?;

        let member_ids = Self::member_ids(session, group_id).await?;
        let members = UsersService::get_many(session, &member_ids).await?;

        Ok(GroupDetails {
            group_id,
            events: events.into_iter().map(Event::from).collect(),
            members,
        })
    }
}
