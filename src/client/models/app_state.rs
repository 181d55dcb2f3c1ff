use tokio_util::sync::CancellationToken;

use crate::client::config::ClientConfig;
use crate::client::gui::views::logger::{LogLevel, LogMessage};
use crate::client::screens::booked_events::BookedEventsScreen;
use crate::client::screens::events::EventsScreen;
use crate::client::screens::find_friends::FindFriendsScreen;
use crate::client::screens::friend_events::FriendEventsScreen;
use crate::client::screens::friend_requests::FriendRequestsScreen;
use crate::client::screens::friends::FriendsScreen;
use crate::client::screens::group_details::GroupDetailsScreen;
use crate::client::screens::groups::GroupsScreen;
use crate::client::screens::login::LoginScreen;
use crate::client::screens::profile::ProfileScreen;
use crate::common::models::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Login,
    Events,
    BookedEvents,
    Groups,
    GroupDetails(i64),
    Friends,
    FriendEvents(UserProfile),
    FriendRequests,
    FindFriends,
    Profile,
}

impl Route {
    /// Entries of the tab bar, in display order.
    pub const TABS: [(Route, &'static str); 7] = [
        (Route::Home, "Home"),
        (Route::Events, "Events"),
        (Route::BookedEvents, "Booked"),
        (Route::Groups, "Groups"),
        (Route::Friends, "Friends"),
        (Route::FindFriends, "Find Friends"),
        (Route::Profile, "Profile"),
    ];

    /// Tab that stays highlighted while this route is shown.
    pub fn tab(&self) -> Route {
        match self {
            Route::GroupDetails(_) => Route::Groups,
            Route::FriendEvents(_) => Route::Friends,
            Route::FriendRequests => Route::Profile,
            other => other.clone(),
        }
    }
}

pub struct AppState {
    pub route: Route,
    pub checking_session: bool,
    /// Bumped on every navigation; results tagged with an older value are stale.
    pub nav_seq: u64,
    /// Scoped to the visible screen; cancelled when it is left.
    pub cancel: CancellationToken,
    /// Last action result; a new entry replaces the old one.
    pub logger: Option<LogMessage>,
    pub login: LoginScreen,
    pub events: EventsScreen,
    pub booked_events: BookedEventsScreen,
    pub groups: GroupsScreen,
    pub group_details: GroupDetailsScreen,
    pub friends: FriendsScreen,
    pub friend_events: Option<FriendEventsScreen>,
    pub friend_requests: FriendRequestsScreen,
    pub find_friends: FindFriendsScreen,
    pub profile: ProfileScreen,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        AppState {
            route: Route::Login,
            checking_session: true,
            nav_seq: 0,
            cancel: CancellationToken::new(),
            logger: None,
            login: LoginScreen::new(config),
            events: EventsScreen::default(),
            booked_events: BookedEventsScreen::default(),
            groups: GroupsScreen::default(),
            group_details: GroupDetailsScreen::new(0),
            friends: FriendsScreen::default(),
            friend_events: None,
            friend_requests: FriendRequestsScreen::default(),
            find_friends: FindFriendsScreen::default(),
            profile: ProfileScreen::default(),
        }
    }

    /// Cancel the current screen's work and move to `route`. Returns the
    /// sequence number results for the new screen must carry.
    pub fn enter(&mut self, route: Route) -> u64 {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.nav_seq += 1;
        if self.route != route {
            self.profile.disarm();
        }
        self.route = route;
        self.nav_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.nav_seq
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.logger = Some(LogMessage { level, message: message.into() });
    }
}
