use crate::client::models::two_phase::TwoPhaseOutcome;
use crate::client::models::app_state::Route;
use crate::client::screens::events::EventsData;
use crate::client::screens::profile::ProfileData;
use crate::client::services::api_client::ApiError;
use crate::client::services::oauth::{OAuthError, OAuthProvider};
use crate::client::services::users_service::AccountDeletion;
use crate::common::models::{
    Event, Friendship, FriendshipAction, Group, GroupDetails, PendingRequest, StoredEvent, UserEvent, UserProfile,
};

#[derive(Debug, Clone)]
pub enum Message {
    SessionChecked(bool),
    Navigate(Route),
    Refresh,
    ClearLog,
    // Screen loads, tagged with the navigation sequence they belong to
    LoadCancelled,
    EventsLoaded(u64, Result<EventsData, ApiError>),
    BookedEventsLoaded(u64, Result<Vec<Event>, ApiError>),
    GroupsLoaded(u64, Result<Vec<Group>, ApiError>),
    GroupDetailsLoaded(u64, Result<GroupDetails, ApiError>),
    FriendsLoaded(u64, Result<Vec<UserProfile>, ApiError>),
    FriendEventsLoaded(u64, Result<Vec<Event>, ApiError>),
    FriendRequestsLoaded(u64, Result<Vec<PendingRequest>, ApiError>),
    FindFriendsLoaded(u64, Result<Vec<UserProfile>, ApiError>),
    ProfileLoaded(u64, Result<ProfileData, ApiError>),
    // Sign-in
    SignIn(OAuthProvider),
    CopyAuthorizeUrl,
    RedirectInputChanged(String),
    SubmitRedirect,
    CancelSignIn,
    SignInFinished(Result<(), OAuthError>),
    // Events
    BookEvent(usize),
    GroupSelected(Group),
    AddToGroup(usize),
    BookingDone(TwoPhaseOutcome<StoredEvent, UserEvent>),
    GroupLinkDone(i64, TwoPhaseOutcome<StoredEvent, ()>),
    RetryLink,
    RetryLinkDone(Result<(), ApiError>),
    // Groups
    GroupNameChanged(String),
    CreateGroup,
    GroupCreated(Result<Group, ApiError>),
    JoinGroup(i64),
    GroupJoined(i64, Result<(), ApiError>),
    // Friends
    /// Row index on the Find Friends screen
    AddFriend(usize),
    FriendRequestSent(i64, Result<(), ApiError>),
    RespondToRequest(i64, FriendshipAction),
    RequestAnswered(i64, FriendshipAction, Result<Friendship, ApiError>),
    // Profile
    SignOutPressed,
    SignedOut(Result<(), ApiError>),
    DeleteAccountPressed,
    AccountDeleted(AccountDeletion),
}
