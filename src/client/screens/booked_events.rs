use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::session::Session;
use crate::common::models::Event;

#[derive(Debug, Clone, Default)]
pub struct BookedEventsScreen {
    pub state: LoadState<Vec<Event>>,
}

impl Screen for BookedEventsScreen {
    type Data = Vec<Event>;

    fn title(&self) -> String {
        "My Booked Events".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading booked events..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::new("No booked events yet")
    }

    fn error_lines(&self, error: &str) -> Vec<String> {
        vec![format!("Could not load booked events: {}", error)]
    }

    fn state(&self) -> &LoadState<Vec<Event>> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<Vec<Event>> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Vec<Event>, ApiError>> {
        async move {
            let booked = EventsService::my_booked_events(&session).await?;
            Ok(booked.into_iter().map(|b| Event::from(b.event)).collect())
        }
        .boxed()
    }

    fn rows(&self, data: &Vec<Event>) -> Vec<Row> {
        data.iter()
            .map(|e| Row::new(e.title.clone()).line(e.date_time()).line(e.venue.summary()))
            .collect()
    }
}
