// Wire DTOs exchanged with the EventLink backend, plus the canonical event model
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Backends send `null` for missing strings; treat it as empty.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl UserProfile {
    /// userName when set, otherwise the email
    pub fn display_name(&self) -> &str {
        match self.user_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.user_email,
        }
    }

    pub fn initials(&self) -> String {
        let initials: String = self
            .user_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect::<String>()
            .to_uppercase();
        if initials.is_empty() { "U".to_string() } else { initials }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Event as returned by the discovery listing (`GET /api/events/popular`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryEvent {
    #[serde(deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub local_date: String,
    pub local_time: Option<String>,
    pub date_time: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_city: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_state: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_country: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub source: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
}

impl DiscoveryEvent {
    /// Body for `POST /api/events/stored`.
    pub fn to_stored_payload(&self) -> NewStoredEvent {
        NewStoredEvent {
            title: self.name.clone(),
            description: format!("{} event", self.name),
            event_date: self.local_date.clone(),
            event_time: self.local_time.clone().unwrap_or_else(|| "00:00:00".to_string()),
            event_url: self.url.clone(),
            external_event_id: self.id.clone(),
            external_source: "ticketmaster".to_string(),
            category: self.category.clone(),
            genre: self.genre.clone(),
            image_url: self.image_url.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            currency: self.currency.clone().unwrap_or_else(|| "USD".to_string()),
            venue_name: self.venue_name.clone(),
            venue_city: self.venue_city.clone(),
            venue_state: self.venue_state.clone(),
            venue_country: self.venue_country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PopularEventsResponse {
    #[serde(default)]
    pub events: Vec<DiscoveryEvent>,
}

/// Event as persisted by the backend (`/api/events/stored`, `/api/user-events`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredEvent {
    pub id: i64,
    #[serde(deserialize_with = "nullable_string")]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub event_date: String,
    #[serde(deserialize_with = "nullable_string")]
    pub event_time: String,
    pub event_url: Option<String>,
    pub external_event_id: Option<String>,
    pub external_source: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_city: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_state: String,
    #[serde(deserialize_with = "nullable_string")]
    pub venue_country: String,
}

/// `{ "event": { ... } }` wrapper used by the stored-event endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredEventEnvelope {
    pub event: StoredEvent,
}

/// One entry of `GET /api/user-events/{userId}`.
pub type BookedEvent = StoredEventEnvelope;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoredEvent {
    pub title: String,
    pub description: String,
    pub event_date: String,
    pub event_time: String,
    pub event_url: Option<String>,
    pub external_event_id: String,
    pub external_source: String,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub currency: String,
    pub venue_name: String,
    pub venue_city: String,
    pub venue_state: String,
    pub venue_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Venue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Venue {
    /// "name: city state country"
    pub fn summary(&self) -> String {
        format!("{}: {} {} {}", self.name, self.city, self.state, self.country)
    }

    /// "name • city, state • country", skipping missing parts
    pub fn compact(&self) -> String {
        let mut out = self.name.clone();
        if !self.city.is_empty() {
            out.push_str(&format!(" • {}", self.city));
        }
        if !self.state.is_empty() {
            out.push_str(&format!(", {}", self.state));
        }
        if !self.country.is_empty() {
            out.push_str(&format!(" • {}", self.country));
        }
        out
    }
}

/// Canonical in-app event. Both wire shapes translate into this at the boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// Backend id, only known once the event has been stored.
    pub id: Option<i64>,
    pub external_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub event_time: String,
    pub venue: Venue,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub event_url: Option<String>,
    pub source: Option<String>,
}

impl Event {
    pub fn date_time(&self) -> String {
        format!("{} {}", self.event_date, self.event_time)
    }

    pub fn starts_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d").ok()
    }

    /// "category • genre" with empty parts dropped
    pub fn classification(&self) -> Option<String> {
        let parts: Vec<&str> = [self.category.as_deref(), self.genre.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() { None } else { Some(parts.join(" • ")) }
    }
}

impl From<DiscoveryEvent> for Event {
    fn from(e: DiscoveryEvent) -> Self {
        Event {
            id: None,
            external_id: Some(e.id),
            title: e.name,
            description: None,
            event_date: e.local_date,
            event_time: e.local_time.unwrap_or_default(),
            venue: Venue {
                name: e.venue_name,
                city: e.venue_city,
                state: e.venue_state,
                country: e.venue_country,
            },
            min_price: e.min_price,
            max_price: e.max_price,
            currency: e.currency,
            category: e.category,
            genre: e.genre,
            image_url: e.image_url,
            event_url: e.url,
            source: e.source,
        }
    }
}

impl From<StoredEvent> for Event {
    fn from(e: StoredEvent) -> Self {
        Event {
            id: Some(e.id),
            external_id: e.external_event_id,
            title: e.title,
            description: e.description,
            event_date: e.event_date,
            event_time: e.event_time,
            venue: Venue {
                name: e.venue_name,
                city: e.venue_city,
                state: e.venue_state,
                country: e.venue_country,
            },
            min_price: e.min_price,
            max_price: e.max_price,
            currency: e.currency,
            category: e.category,
            genre: e.genre,
            image_url: e.image_url,
            event_url: e.event_url,
            source: e.external_source,
        }
    }
}

/// Join row linking a user to a stored event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: i64,
    pub event_id: i64,
    pub is_attending: bool,
    pub wants_to_go: bool,
}

impl UserEvent {
    pub fn attending(user_id: i64, event_id: i64) -> Self {
        UserEvent { id: None, user_id, event_id, is_attending: true, wants_to_go: true }
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub group_name: String,
    /// Creator
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.group_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub group_name: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberKey {
    pub group_id: i64,
    pub user_id: i64,
}

/// Body for `POST /api/groupMembers/add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupMembership {
    pub id: GroupMemberKey,
}

impl GroupMembership {
    pub fn new(group_id: i64, user_id: i64) -> Self {
        GroupMembership { id: GroupMemberKey { group_id, user_id } }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEventKey {
    pub group_id: i64,
    pub event_id: i64,
}

/// Body for `POST /api/groupEvents/add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupEventLink {
    pub id: GroupEventKey,
}

impl GroupEventLink {
    pub fn new(group_id: i64, event_id: i64) -> Self {
        GroupEventLink { id: GroupEventKey { group_id, event_id } }
    }
}

/// Result of the group-details fan-out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupDetails {
    pub group_id: i64,
    pub events: Vec<Event>,
    pub members: Vec<UserProfile>,
}

// ---------------------------------------------------------------------------
// Friendships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: i64,
    pub user1_id: i64,
    pub user2_id: i64,
    pub status: FriendshipStatus,
    pub requested_by: i64,
}

impl Friendship {
    /// The participant that is not `my_id`.
    pub fn other_user_id(&self, my_id: i64) -> i64 {
        if self.user1_id == my_id { self.user2_id } else { self.user1_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub to_user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipAction {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FriendshipUpdate {
    pub action: FriendshipAction,
}

/// Pending friendship enriched with the other participant, when it could be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub friendship: Friendship,
    pub other_user: Option<UserProfile>,
}

impl PendingRequest {
    pub fn display_name(&self) -> &str {
        match &self.other_user {
            Some(user) if !user.display_name().is_empty() => user.display_name(),
            _ => "Unknown user",
        }
    }

    pub fn email(&self) -> &str {
        self.other_user.as_ref().map(|u| u.user_email.as_str()).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCodeExchange {
    pub code: String,
    pub code_verifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuthTokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_tolerates_missing_fields() {
        let p: UserProfile = serde_json::from_value(json!({ "userId": 10 })).unwrap();
        assert_eq!(p.user_id, 10);
        assert_eq!(p.user_name, None);
        assert_eq!(p.display_name(), "");
        assert_eq!(p.initials(), "U");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let p = UserProfile {
            user_id: 2,
            user_name: Some("  ".into()),
            user_email: "alice@example.com".into(),
            profile_picture: None,
        };
        assert_eq!(p.display_name(), "alice@example.com");
    }

    #[test]
    fn stored_envelope_maps_to_canonical_event() {
        let booked: BookedEvent = serde_json::from_value(json!({
            "event": {
                "id": 101,
                "title": "Lakers vs Warriors",
                "eventDate": "2025-12-12",
                "eventTime": "19:00:00",
                "venueName": "Crypto.com Arena",
                "venueCity": "Los Angeles",
                "venueState": "CA",
                "venueCountry": "USA",
                "eventUrl": "https://nba.com",
                "imageUrl": null
            }
        }))
        .unwrap();
        let event = Event::from(booked.event);
        assert_eq!(event.id, Some(101));
        assert_eq!(event.date_time(), "2025-12-12 19:00:00");
        assert_eq!(event.venue.summary(), "Crypto.com Arena: Los Angeles CA USA");
        assert_eq!(event.starts_on(), NaiveDate::from_ymd_opt(2025, 12, 12));
    }

    #[test]
    fn discovery_payload_fills_defaults() {
        let d: DiscoveryEvent = serde_json::from_value(json!({
            "id": "tm-1",
            "name": "Jazz Night",
            "localDate": "2026-01-02",
            "localTime": null,
            "venueName": null,
            "minPrice": 20.5
        }))
        .unwrap();
        let payload = d.to_stored_payload();
        assert_eq!(payload.event_time, "00:00:00");
        assert_eq!(payload.currency, "USD");
        assert_eq!(payload.external_source, "ticketmaster");
        assert_eq!(payload.description, "Jazz Night event");

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["externalEventId"], "tm-1");
        assert_eq!(body["minPrice"], 20.5);

        let event = Event::from(d);
        assert_eq!(event.id, None);
        assert_eq!(event.external_id.as_deref(), Some("tm-1"));
        assert_eq!(event.venue.name, "");
    }

    #[test]
    fn friendship_counterpart_and_status() {
        let f: Friendship = serde_json::from_value(json!({
            "id": 5, "user1Id": 1, "user2Id": 7, "status": "pending", "requestedBy": 7
        }))
        .unwrap();
        assert_eq!(f.other_user_id(1), 7);
        assert_eq!(f.other_user_id(7), 1);
        assert_eq!(f.status, FriendshipStatus::Pending);

        let odd: FriendshipStatus = serde_json::from_value(json!("blocked")).unwrap();
        assert_eq!(odd, FriendshipStatus::Unknown);
    }

    #[test]
    fn write_bodies_use_backend_field_names() {
        assert_eq!(
            serde_json::to_value(GroupMembership::new(3, 9)).unwrap(),
            json!({ "id": { "groupId": 3, "userId": 9 } })
        );
        assert_eq!(
            serde_json::to_value(FriendRequest { to_user_id: 4 }).unwrap(),
            json!({ "toUserId": 4 })
        );
        assert_eq!(
            serde_json::to_value(FriendshipUpdate { action: FriendshipAction::Reject }).unwrap(),
            json!({ "action": "reject" })
        );
        assert_eq!(
            serde_json::to_value(UserEvent::attending(10, 101)).unwrap(),
            json!({ "userId": 10, "eventId": 101, "isAttending": true, "wantsToGo": true })
        );
    }

    #[test]
    fn venue_compact_skips_empty_parts() {
        let v = Venue { name: "Arena".into(), city: "Austin".into(), state: String::new(), country: "US".into() };
        assert_eq!(v.compact(), "Arena • Austin • US");
    }
}
