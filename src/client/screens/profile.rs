use std::sync::Arc;

use chrono::{Local, NaiveDate};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::warn;

use crate::client::models::load_state::LoadState;
use crate::client::screens::{EmptyState, Row, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::friends_service::FriendsService;
use crate::client::services::session::Session;
use crate::common::models::{Event, UserProfile};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileData {
    /// `None` when the profile request failed; the screen still renders.
    pub profile: Option<UserProfile>,
    pub friends: Vec<UserProfile>,
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

/// Split on `today`; undated events count as upcoming.
pub fn split_by_date(events: Vec<Event>, today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    events.into_iter().partition(|e| e.starts_on().map_or(true, |d| d >= today))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    SignOut,
    DeleteAccount,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileScreen {
    pub state: LoadState<ProfileData>,
    pub armed: Option<ProfileAction>,
}

impl ProfileScreen {
    /// First press arms `action`, a second press of the same action confirms it.
    pub fn press(&mut self, action: ProfileAction) -> bool {
        if self.armed == Some(action) {
            self.armed = None;
            true
        } else {
            self.armed = Some(action);
            false
        }
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }
}

fn section(title: &str, events: &[Event], empty: &str) -> Row {
    if events.is_empty() {
        return Row::new(title).line(empty);
    }
    events
        .iter()
        .fold(Row::new(title), |row, e| row.line(format!("{} - {}", e.title, e.event_date)))
}

impl Screen for ProfileScreen {
    type Data = ProfileData;

    fn title(&self) -> String {
        "Profile".to_string()
    }

    fn loading_text(&self) -> &'static str {
        "Loading profile..."
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::new("You don't have any friends yet.")
    }

    fn state(&self) -> &LoadState<ProfileData> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LoadState<ProfileData> {
        &mut self.state
    }

    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<ProfileData, ApiError>> {
        async move {
            if !session.is_authenticated() {
                return Err(ApiError::NotAuthenticated);
            }
            let profile = match session.profile().await {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("[PROFILE] Profile error: {}", e);
                    None
                }
            };
            let friends = FriendsService::friends(&session).await.unwrap_or_else(|e| {
                warn!("[PROFILE] Friends error: {}", e);
                Vec::new()
            });
            let booked = match &profile {
                Some(p) => EventsService::booked_events(&session, p.user_id).await.unwrap_or_else(|e| {
                    warn!("[PROFILE] Booked events error: {}", e);
                    Vec::new()
                }),
                None => Vec::new(),
            };
            let events = booked.into_iter().map(|b| Event::from(b.event)).collect();
            let (upcoming, past) = split_by_date(events, Local::now().date_naive());
            Ok(ProfileData { profile, friends, upcoming, past })
        }
        .boxed()
    }

    fn rows(&self, data: &ProfileData) -> Vec<Row> {
        let header = match &data.profile {
            Some(p) => {
                let name = p.user_name.clone().filter(|n| !n.trim().is_empty()).unwrap_or_else(|| "Your Name".to_string());
                Row::new(name).line(p.user_email.clone())
            }
            None => Row::new("Your Name"),
        };
        let friends = if data.friends.is_empty() {
            Row::new("Friends").line(self.empty_state().title)
        } else {
            data.friends
                .iter()
                .fold(Row::new("Friends"), |row, f| row.line(format!("{} ({})", f.display_name(), f.user_email)))
        };
        vec![
            header,
            section("Upcoming Events", &data.upcoming, "No upcoming events"),
            section("Past Events", &data.past, "No past events"),
            friends,
        ]
    }
}
