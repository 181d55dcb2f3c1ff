use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::session::Session;
use crate::common::models::{Event, UserProfile};

/// Events one friend has saved or is attending.
#[derive(Debug, Clone)]
pub struct FriendEventsScreen {
    pub friend_id: i64,
    pub friend_name: String,
    pub state: LoadState<Vec<Event>>,
}

impl FriendEventsScreen {
    pub fn new(friend: &UserProfile) -> Self {
        FriendEventsScreen {
            friend_id: friend.user_id,
            friend_name: friend.display_name().to_string(),
            state: LoadState::Loading,
        }
    }
}

impl Screen for FriendEventsScreen {
    type Data = Vec<Event>;

    fn title(&self) -> String {
        format!("{}'s Events", self.friend_name)
    }

    fn subtitle(&self) -> Option<String> {
        Some("Events they've saved / are attending".to_string())
    }

    fn loading_text(&self) -> &'static str {
        "Loading events..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::with_body("No events yet", format!("{} hasn't added any events yet.", self.friend_name))
    }

    fn error_lines(&self, error: &str) -> Vec<String> {
        vec![format!("Could not load events: {}", error)]
    }

    fn state(&self) -> &LoadState<Vec<Event>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<Event>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<Event>, ApiError>> {
        let friend_id = self.friend_id;
        async move {
            let events = EventsService::friend_events(&session, friend_id).await?;
            Ok(events.into_iter().map(Event::from).collect())
        }
        .boxed()
    }

    fn rows(&self, data: &Vec<Event>) -> Vec<Row> {
        data.iter()
            .map(|e| {
                let mut row = Row::new(e.title.clone());
                if let Some(kind) = e.classification() {
                    row = row.line(kind);
                }
                row = row.line(e.date_time());
                if !e.venue.name.is_empty() {
                    row = row.line(e.venue.compact());
                }
                if let Some(description) = e.description.as_deref().filter(|d| !d.is_empty()) {
                    row = row.line(description);
                }
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> FriendEventsScreen {
        FriendEventsScreen::new(&UserProfile {
            user_id: 7,
            user_name: Some("Dana".into()),
            user_email: "dana@example.com".into(),
            profile_picture: None,
        })
    }

    #[test]
    fn empty_state_names_the_friend() {
        let mut screen = screen();
        screen.state.finish(Ok(vec![]));
        assert_eq!(
            screen.render(),
            vec![
                "Dana's Events",
                "Events they've saved / are attending",
                "No events yet",
                "Dana hasn't added any events yet."
            ]
        );
    }

    #[test]
    fn loading_shows_spinner_text() {
        let lines = screen().render();
        assert_eq!(lines.last().map(String::as_str), Some("Loading events..."));
    }
}
