use log::{info, warn};

use crate::client::models::two_phase::TwoPhaseOutcome;
use crate::client::services::api_client::ApiError;
use crate::client::services::session::Session;
use crate::common::models::{
    BookedEvent, DiscoveryEvent, GroupEventLink, NewStoredEvent, PopularEventsResponse, StoredEvent,
    StoredEventEnvelope, UserEvent,
};

#[derive(Debug, Default)]
pub struct EventsService;

impl EventsService {
    /// Discovery listing; no token required.
    pub async fn popular(session: &Session) -> Result<Vec<DiscoveryEvent>, ApiError> {
        let response: PopularEventsResponse = session.api().get_json_public("/api/events/popular").await?;
        Ok(response.events)
    }

    pub async fn store_event(session: &Session, payload: &NewStoredEvent) -> Result<StoredEvent, ApiError> {
        let stored: StoredEventEnvelope = session.api().post_json("/api/events/stored", payload).await?;
        Ok(stored.event)
    }

    pub async fn stored_event(session: &Session, event_id: i64) -> Result<StoredEvent, ApiError> {
        let stored: StoredEventEnvelope =
            session.api().get_json(&format!("/api/events/stored/{}", event_id)).await?;
        Ok(stored.event)
    }

    pub async fn create_user_event(session: &Session, link: &UserEvent) -> Result<UserEvent, ApiError> {
        session.api().post_json("/api/user-events", link).await
    }

    pub async fn booked_events(session: &Session, user_id: i64) -> Result<Vec<BookedEvent>, ApiError> {
        session.api().get_json(&format!("/api/user-events/{}", user_id)).await
    }

    pub async fn my_booked_events(session: &Session) -> Result<Vec<BookedEvent>, ApiError> {
        let user_id = session.my_id().await?;
        Self::booked_events(session, user_id).await
    }

    pub async fn friend_events(session: &Session, friend_id: i64) -> Result<Vec<StoredEvent>, ApiError> {
        session.api().get_json(&format!("/api/user-events/user/{}", friend_id)).await
    }

    pub async fn link_to_group(session: &Session, group_id: i64, event_id: i64) -> Result<(), ApiError> {
        session.api().post("/api/groupEvents/add", &GroupEventLink::new(group_id, event_id)).await
    }

    /// Store the event, then mark the current user as attending it.
    pub async fn book_event(
        session: &Session,
        event: &DiscoveryEvent,
    ) -> TwoPhaseOutcome<StoredEvent, UserEvent> {
        let user_id = match session.my_id().await {
            Ok(id) => id,
            Err(e) => return TwoPhaseOutcome::FirstFailed(e),
        };
        let stored = match Self::store_event(session, &event.to_stored_payload()).await {
            Ok(stored) => stored,
            Err(e) => return TwoPhaseOutcome::FirstFailed(e),
        };
        match Self::create_user_event(session, &UserEvent::attending(user_id, stored.id)).await {
            Ok(link) => {
                info!("[EVENTS] Booked event {} for user {}", stored.id, user_id);
                TwoPhaseOutcome::Completed { first: stored, second: link }
            }
            Err(error) => {
                warn!("[EVENTS] Event {} stored but booking link failed: {}", stored.id, error);
                TwoPhaseOutcome::SecondFailed { first: stored, error }
            }
        }
    }

    /// Second step of [`EventsService::book_event`] alone.
    pub async fn retry_booking_link(session: &Session, stored: &StoredEvent) -> Result<UserEvent, ApiError> {
        let user_id = session.my_id().await?;
        Self::create_user_event(session, &UserEvent::attending(user_id, stored.id)).await
    }

    /// Store the event, then attach it to `group_id`.
    pub async fn add_event_to_group(
        session: &Session,
        event: &DiscoveryEvent,
        group_id: i64,
    ) -> TwoPhaseOutcome<StoredEvent, ()> {
        let stored = match Self::store_event(session, &event.to_stored_payload()).await {
            Ok(stored) => stored,
            Err(e) => return TwoPhaseOutcome::FirstFailed(e),
        };
        match Self::link_to_group(session, group_id, stored.id).await {
            Ok(()) => {
                info!("[EVENTS] Added event {} to group {}", stored.id, group_id);
                TwoPhaseOutcome::Completed { first: stored, second: () }
            }
            Err(error) => {
                warn!("[EVENTS] Event {} stored but group {} link failed: {}", stored.id, group_id, error);
                TwoPhaseOutcome::SecondFailed { first: stored, error }
            }
        }
    }

    /// Second step of [`EventsService::add_event_to_group`] alone.
    pub async fn retry_group_link(session: &Session, stored: &StoredEvent, group_id: i64) -> Result<(), ApiError> {
        Self::link_to_group(session, group_id, stored.id).await
    }
}
