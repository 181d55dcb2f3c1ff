mod support;

use std::time::Duration;

use serde_json::json;

use eventlink::client::models::two_phase::TwoPhaseOutcome;
use eventlink::client::services::api_client::ApiError;
use eventlink::client::services::events_service::EventsService;
use eventlink::client::services::friends_service::FriendsService;
use eventlink::client::services::users_service::{AccountDeletion, UsersService};
use eventlink::common::models::DiscoveryEvent;

use support::MockBackend;

fn jazz_night() -> DiscoveryEvent {
    serde_json::from_value(json!({
        "id": "tm-42",
        "name": "Jazz Night",
        "localDate": "2026-02-14",
        "localTime": "21:00:00",
        "venueName": "Blue Note",
        "venueCity": "New York",
        "venueState": "NY",
        "venueCountry": "US",
        "minPrice": 35.0
    }))
    .unwrap()
}

fn stored_jazz_night() -> serde_json::Value {
    json!({ "event": { "id": 77, "title": "Jazz Night", "eventDate": "2026-02-14", "eventTime": "21:00:00" } })
}

#[tokio::test]
async fn popular_events_need_no_token() {
    let backend = MockBackend::start().await;
    backend.mock("GET", "/api/events/popular", 200, json!({ "events": [{ "id": "tm-1", "name": "Show" }] }));

    let session = backend.session(false);
    let events = EventsService::popular(&session).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(backend.requests()[0].authorization, None);
}

#[tokio::test]
async fn booking_stores_then_links_the_user() {
    let backend = MockBackend::start().await;
    backend.mock("GET", "/api/users/profile", 200, json!({ "userId": 10 }));
    backend.mock("POST", "/api/events/stored", 200, stored_jazz_night());
    backend.mock(
        "POST",
        "/api/user-events",
        200,
        json!({ "id": 5, "userId": 10, "eventId": 77, "isAttending": true, "wantsToGo": true }),
    );

    let outcome = EventsService::book_event(&backend.session(true), &jazz_night()).await;
    assert!(outcome.is_complete());

    let store = &backend.requests_to("POST", "/api/events/stored")[0];
    let body = store.body.as_ref().unwrap();
    assert_eq!(body["title"], "Jazz Night");
    assert_eq!(body["externalEventId"], "tm-42");
    assert_eq!(body["externalSource"], "ticketmaster");
    assert_eq!(body["currency"], "USD");

    let link = &backend.requests_to("POST", "/api/user-events")[0];
    assert_eq!(
        link.body,
        Some(json!({ "userId": 10, "eventId": 77, "isAttending": true, "wantsToGo": true }))
    );
}

#[tokio::test]
async fn failed_store_writes_nothing_else() {
    let backend = MockBackend::start().await;
    backend.mock("POST", "/api/events/stored", 500, json!({}));

    let outcome = EventsService::add_event_to_group(&backend.session(true), &jazz_night(), 3).await;
    assert!(matches!(outcome, TwoPhaseOutcome::FirstFailed(ApiError::Status { status: 500, .. })));
    assert!(backend.requests_to("POST", "/api/groupEvents/add").is_empty());
}

#[tokio::test]
async fn failed_group_link_keeps_the_stored_event_for_retry() {
    let backend = MockBackend::start().await;
    backend.mock("POST", "/api/events/stored", 200, stored_jazz_night());
    backend.mock("POST", "/api/groupEvents/add", 503, json!({}));

    let session = backend.session(true);
    let outcome = EventsService::add_event_to_group(&session, &jazz_night(), 3).await;
    let stored = match outcome {
        TwoPhaseOutcome::SecondFailed { first, error } => {
            assert_eq!(error.status(), Some(503));
            first
        }
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(stored.id, 77);

    // only the link step is repeated
    backend.mock("POST", "/api/groupEvents/add", 200, json!({}));
    EventsService::retry_group_link(&session, &stored, 3).await.unwrap();
    assert_eq!(backend.requests_to("POST", "/api/events/stored").len(), 1);
    let links = backend.requests_to("POST", "/api/groupEvents/add");
    assert_eq!(links.len(), 2);
    assert_eq!(links[1].body, Some(json!({ "id": { "groupId": 3, "eventId": 77 } })));
}

#[tokio::test]
async fn pending_requests_tolerate_missing_users() {
    let backend = MockBackend::start().await;
    backend.mock("GET", "/api/users/profile", 200, json!({ "userId": 1 }));
    backend.mock(
        "GET",
        "/api/friendships/pending",
        200,
        json!([
            { "id": 8, "user1Id": 2, "user2Id": 1, "status": "pending", "requestedBy": 2 },
            { "id": 9, "user1Id": 1, "user2Id": 3, "status": "pending", "requestedBy": 3 }
        ]),
    );
    backend.mock("GET", "/api/users/2", 200, json!({ "userId": 2, "userName": "Bob", "userEmail": "bob@x.io" }));
    // user 3 is unmocked

    let pending = FriendsService::pending_with_users(&backend.session(true)).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].display_name(), "Bob");
    assert_eq!(pending[1].display_name(), "Unknown user");
    assert_eq!(pending[1].friendship.other_user_id(1), 3);
}

#[tokio::test]
async fn responding_sends_the_action() {
    let backend = MockBackend::start().await;
    backend.mock(
        "PUT",
        "/api/friendships/8",
        200,
        json!({ "id": 8, "user1Id": 2, "user2Id": 1, "status": "accepted", "requestedBy": 2 }),
    );

    let updated = FriendsService::respond(
        &backend.session(true),
        8,
        eventlink::common::models::FriendshipAction::Accept,
    )
    .await
    .unwrap();
    assert_eq!(updated.status, eventlink::common::models::FriendshipStatus::Accepted);
    assert_eq!(backend.requests()[0].body, Some(json!({ "action": "accept" })));
}

#[tokio::test]
async fn account_deletion_branches_on_status() {
    let backend = MockBackend::start().await;
    backend.mock("DELETE", "/api/users/account", 404, json!({}));
    let session = backend.session(true);
    assert_eq!(UsersService::delete_account(&session).await, AccountDeletion::NotFound);
    assert!(session.is_authenticated());

    backend.mock("DELETE", "/api/users/account", 401, json!({}));
    assert_eq!(UsersService::delete_account(&session).await, AccountDeletion::Unauthorized);

    backend.mock("DELETE", "/api/users/account", 500, json!({}));
    assert!(matches!(UsersService::delete_account(&session).await, AccountDeletion::Failed(_)));

    backend.mock("DELETE", "/api/users/account", 200, json!({}));
    assert_eq!(UsersService::delete_account(&session).await, AccountDeletion::Deleted);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn account_deletion_without_token_is_unauthorized() {
    let backend = MockBackend::start().await;
    let session = backend.session(false);
    assert_eq!(UsersService::delete_account(&session).await, AccountDeletion::Unauthorized);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn profile_is_fetched_once_per_session() {
    let backend = MockBackend::start().await;
    backend.mock("GET", "/api/users/profile", 200, json!({ "userId": 10 }));
    let session = backend.session(true);

    assert_eq!(session.my_id().await.unwrap(), 10);
    assert_eq!(session.my_id().await.unwrap(), 10);
    assert_eq!(backend.requests_to("GET", "/api/users/profile").len(), 1);

    session.sign_out().await.unwrap();
    assert!(!session.is_authenticated());
    assert!(session.cached_profile().await.is_none());
}

#[tokio::test]
async fn sign_out_does_not_wait_for_a_pending_profile_fetch() {
    let backend = MockBackend::start().await;
    backend.mock_delayed("GET", "/api/users/profile", json!({ "userId": 10 }), Duration::from_millis(800));
    let session = backend.session(true);

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.profile().await })
    };
    // let the request reach the backend
    while backend.requests_to("GET", "/api/users/profile").is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    tokio::time::timeout(Duration::from_millis(200), session.sign_out())
        .await
        .expect("sign-out blocked on the profile request")
        .unwrap();
    assert!(!session.is_authenticated());

    // the late response does not repopulate the signed-out session
    assert_eq!(pending.await.unwrap().unwrap().user_id, 10);
    assert!(session.cached_profile().await.is_none());
}

#[tokio::test]
async fn failed_booking_link_keeps_the_stored_event_for_retry() {
    let backend = MockBackend::start().await;
    backend.mock("GET", "/api/users/profile", 200, json!({ "userId": 10 }));
    backend.mock("POST", "/api/events/stored", 200, stored_jazz_night());
    backend.mock("POST", "/api/user-events", 500, json!({ "error": "db down" }));

    let session = backend.session(true);
    let outcome = EventsService::book_event(&session, &jazz_night()).await;
    assert_eq!(outcome.summary("done"), "Event saved but could not be linked: backend error: 500");
    let stored = match outcome {
        TwoPhaseOutcome::SecondFailed { first, error } => {
            assert_eq!(error.status(), Some(500));
            first
        }
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(stored.id, 77);

    // only the attendance link is repeated
    backend.mock(
        "POST",
        "/api/user-events",
        200,
        json!({ "id": 5, "userId": 10, "eventId": 77, "isAttending": true, "wantsToGo": true }),
    );
    let link = EventsService::retry_booking_link(&session, &stored).await.unwrap();
    assert_eq!(link.event_id, 77);
    assert_eq!(backend.requests_to("POST", "/api/events/stored").len(), 1);
    let links = backend.requests_to("POST", "/api/user-events");
    assert_eq!(links.len(), 2);
    assert_eq!(links[1].body, links[0].body);
}
