use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::groups_service::GroupsService;
use crate::client::services::session::Session;
use crate::common::models::{Event, GroupDetails};

#[derive(Debug, Clone)]
pub struct GroupDetailsScreen {
    pub group_id: i64,
    pub state: LoadState<GroupDetails>,
}

impl GroupDetailsScreen {
    pub fn new(group_id: i64) -> Self {
        GroupDetailsScreen { group_id, state: LoadState::Loading }
    }
}

fn event_row(e: &Event) -> Row {
    let venue = [&e.venue.name, &e.venue.city, &e.venue.state, &e.venue.country]
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Row::new(e.title.clone())
        .line(format!("Category: {}", e.category.as_deref().unwrap_or_default()))
        .line(format!("Genre: {}", e.genre.as_deref().unwrap_or_default()))
        .line(format!("Date: {}", e.date_time()))
        .line(format!("Venue: {}", venue))
}

impl Screen for GroupDetailsScreen {
    type Data = GroupDetails;

    fn title(&self) -> String {
        format!("Group ID: {}", self.group_id)
    }

    fn loading_text(&self) -> &'static str {
        "Loading group..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::new("No events in this group yet")
    }

    fn error_lines(&self, error: &str) -> Vec<String> {
        vec![format!("Could not load group: {}", error)]
    }

    fn state(&self) -> &LoadState<GroupDetails> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<GroupDetails> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<GroupDetails, ApiError>> {
        let group_id = self.group_id;
        async move { GroupsService::details(&session, group_id).await }.boxed()
    }

    fn rows(&self, data: &GroupDetails) -> Vec<Row> {
        let mut rows: Vec<Row> = data.events.iter().map(event_row).collect();
        if rows.is_empty() && data.members.is_empty() {
            return rows;
        }
        if rows.is_empty() {
            rows.push(Row::new(self.empty_state().title));
        }
        let members = data
            .members
            .iter()
            .map(|m| format!("{} ({})", m.display_name(), m.user_email))
            .fold(Row::new("Members"), |row, line| row.line(line));
        rows.push(members);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::{UserProfile, Venue};

    #[test]
    fn renders_event_blocks_and_members() {
        let mut screen = GroupDetailsScreen::new(1);
        screen.state.finish(Ok(GroupDetails {
            group_id: 1,
            events: vec![Event {
                title: "Lakers vs Warriors".into(),
                category: Some("Sports".into()),
                genre: Some("Basketball".into()),
                event_date: "2025-12-12".into(),
                event_time: "19:00:00".into(),
                venue: Venue {
                    name: "Crypto.com Arena".into(),
                    city: "Los Angeles".into(),
                    state: "CA".into(),
                    country: "USA".into(),
                },
                ..Default::default()
            }],
            members: vec![UserProfile {
                user_id: 10,
                user_name: Some("Alice".into()),
                user_email: "alice@example.com".into(),
                profile_picture: None,
            }],
        }));
        assert_eq!(
            screen.render(),
            vec![
                "Group ID: 1",
                "Lakers vs Warriors",
                "Category: Sports",
                "Genre: Basketball",
                "Date: 2025-12-12 19:00:00",
                "Venue: Crypto.com Arena, Los Angeles, CA, USA",
                "Members",
                "Alice (alice@example.com)",
            ]
        );
    }

    #[test]
    fn members_without_events_keep_the_empty_notice() {
        let mut screen = GroupDetailsScreen::new(4);
        screen.state.finish(Ok(GroupDetails {
            group_id: 4,
            events: vec![],
            members: vec![UserProfile { user_id: 1, user_email: "a@b.c".into(), ..Default::default() }],
        }));
        let lines = screen.render();
        assert_eq!(lines[1], "No events in this group yet");
        assert_eq!(lines[2], "Members");
    }
}
