use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::warn;

use crate::client::models::load_state::LoadState;
use crate::client::models::two_phase::TwoPhaseOutcome;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::groups_service::GroupsService;
use crate::client::services::session::Session;
use crate::common::models::{DiscoveryEvent, Group, StoredEvent};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventsData {
    pub events: Vec<DiscoveryEvent>,
    /// Targets for "Add to Group"; empty when signed out.
    pub groups: Vec<Group>,
}

/// Second step of a two-phase write that failed after the event was stored.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingLink {
    Booking(StoredEvent),
    Group { stored: StoredEvent, group_id: i64 },
}

impl PendingLink {
    pub fn describe(&self) -> String {
        match self {
            PendingLink::Booking(stored) => format!("Retry booking \"{}\"", stored.title),
            PendingLink::Group { stored, group_id } => {
                format!("Retry adding \"{}\" to group {}", stored.title, group_id)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventsScreen {
    pub state: LoadState<EventsData>,
    pub selected_group: Option<Group>,
    pub pending_link: Option<PendingLink>,
}

impl EventsScreen {
    pub fn event(&self, index: usize) -> Option<&DiscoveryEvent> {
        self.state.data().and_then(|d| d.events.get(index))
    }

    /// Remember a half-finished booking so only the link step is retried.
    pub fn record_booking<B>(&mut self, outcome: &TwoPhaseOutcome<StoredEvent, B>) {
        self.pending_link = match outcome {
            TwoPhaseOutcome::SecondFailed { first, .. } => Some(PendingLink::Booking(first.clone())),
            _ => None,
        };
    }

    pub fn record_group_link<B>(&mut self, outcome: &TwoPhaseOutcome<StoredEvent, B>, group_id: i64) {
        self.pending_link = match outcome {
            TwoPhaseOutcome::SecondFailed { first, .. } => {
                Some(PendingLink::Group { stored: first.clone(), group_id })
            }
            _ => None,
        };
    }
}

impl Screen for EventsScreen {
    type Data = EventsData;

    fn title(&self) -> String {
        "Upcoming Events".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading events..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::with_body("No events found", "Check back soon for upcoming events")
    }

    fn state(&self) -> &LoadState<EventsData> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<EventsData> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<EventsData, ApiError>> {
        async move {
            let events = EventsService::popular(&session).await?;
            let groups = if session.is_authenticated() {
                GroupsService::list(&session).await.unwrap_or_else(|e| {
                    warn!("[EVENTS] Groups unavailable for Add to Group: {}", e);
                    Vec::new()
                })
            } else {
                Vec::new()
            };
            Ok(EventsData { events, groups })
        }
        .boxed()
    }

    fn rows(&self, data: &EventsData) -> Vec<Row> {
        data.events
            .iter()
            .map(|e| {
                let venue = if e.venue_name.trim().is_empty() { "Venue TBD" } else { e.venue_name.as_str() };
                let time = e.local_time.as_deref().unwrap_or_default();
                Row::new(e.name.clone()).line(venue).line(format!("{} {}", e.local_date, time).trim_end().to_string())
            })
            .collect()
    }
}
