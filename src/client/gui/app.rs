use std::sync::Arc;

use iced::{Application, Command, Element, Theme};
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::client::config::ClientConfig;
use crate::client::gui::views::logger::LogLevel;
use crate::client::models::app_state::{AppState, Route};
use crate::client::models::messages::Message;
use crate::client::models::two_phase::TwoPhaseOutcome;
use crate::client::screens::events::PendingLink;
use crate::client::screens::friend_events::FriendEventsScreen;
use crate::client::screens::friend_requests::response_alert;
use crate::client::screens::group_details::GroupDetailsScreen;
use crate::client::screens::profile::ProfileAction;
use crate::client::screens::{run_cancellable, Screen};
use crate::client::services::api_client::ApiError;
use crate::client::services::events_service::EventsService;
use crate::client::services::friends_service::FriendsService;
use crate::client::services::groups_service::GroupsService;
use crate::client::services::session::Session;
use crate::client::services::users_service::{AccountDeletion, UsersService};

pub struct AppFlags {
    pub config: ClientConfig,
    pub session: Arc<Session>,
}

pub struct EventLinkApp {
    pub state: AppState,
    pub session: Arc<Session>,
}

/// Start `screen`'s fetch under `cancel`; a cancelled load reports `LoadCancelled`.
fn load<S, F>(screen: &mut S, session: Arc<Session>, cancel: CancellationToken, wrap: F) -> Command<Message>
where
    S: Screen,
    F: FnOnce(Result<S::Data, ApiError>) -> Message + Send + 'static,
{
    screen.state_mut().begin();
    let fut = screen.fetch(session);
    Command::perform(run_cancellable(fut, cancel), move |out| match out {
        Some(result) => wrap(result),
        None => Message::LoadCancelled,
    })
}

/// Apply a load result unless the user has already navigated elsewhere.
fn finish<S: Screen>(current: bool, screen: &mut S, result: Result<S::Data, ApiError>) -> Option<String> {
    if !current {
        debug!("[APP] Dropping stale result for {}", screen.title());
        return None;
    }
    let error = result.as_ref().err().map(|e| format!("{}: {}", screen.title(), e));
    screen.state_mut().finish(result);
    error
}

impl EventLinkApp {
    fn navigate(&mut self, route: Route) -> Command<Message> {
        let seq = self.state.enter(route.clone());
        let cancel = self.state.cancel.clone();
        let session = self.session.clone();
        info!("[APP] Navigate to {:?}", route);

        match route {
            Route::Home | Route::Login => Command::none(),
            Route::Events => load(&mut self.state.events, session, cancel, move |r| Message::EventsLoaded(seq, r)),
            Route::BookedEvents => {
                load(&mut self.state.booked_events, session, cancel, move |r| Message::BookedEventsLoaded(seq, r))
            }
            Route::Groups => load(&mut self.state.groups, session, cancel, move |r| Message::GroupsLoaded(seq, r)),
            Route::GroupDetails(group_id) => {
                self.state.group_details = GroupDetailsScreen::new(group_id);
                load(&mut self.state.group_details, session, cancel, move |r| Message::GroupDetailsLoaded(seq, r))
            }
            Route::Friends => load(&mut self.state.friends, session, cancel, move |r| Message::FriendsLoaded(seq, r)),
            Route::FriendEvents(friend) => {
                let screen = self.state.friend_events.insert(FriendEventsScreen::new(&friend));
                load(screen, session, cancel, move |r| Message::FriendEventsLoaded(seq, r))
            }
            Route::FriendRequests => {
                load(&mut self.state.friend_requests, session, cancel, move |r| Message::FriendRequestsLoaded(seq, r))
            }
            Route::FindFriends => {
                load(&mut self.state.find_friends, session, cancel, move |r| Message::FindFriendsLoaded(seq, r))
            }
            Route::Profile => load(&mut self.state.profile, session, cancel, move |r| Message::ProfileLoaded(seq, r)),
        }
    }

    fn report_load_error(&mut self, error: Option<String>) {
        if let Some(error) = error {
            warn!("[APP] {}", error);
            self.state.log(LogLevel::Error, error);
        }
    }

    fn signed_out(&mut self) -> Command<Message> {
        self.state.login.reset();
        self.navigate(Route::Login)
    }
}

impl Application for EventLinkApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let app = EventLinkApp { state: AppState::new(&flags.config), session: flags.session };
        let session = app.session.clone();
        // Never log the token itself
        let cmd = Command::perform(async move { session.is_authenticated() }, Message::SessionChecked);
        (app, cmd)
    }

    fn title(&self) -> String {
        "EventLink".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SessionChecked(found) => {
                self.state.checking_session = false;
                if found {
                    info!("[APP_START] Found saved session token (redacted)");
                    self.navigate(Route::Home)
                } else {
                    info!("[APP_START] No saved session, showing sign-in");
                    self.navigate(Route::Login)
                }
            }
            Message::Navigate(route) => self.navigate(route),
            Message::Refresh => {
                let route = self.state.route.clone();
                self.navigate(route)
            }
            Message::ClearLog => {
                self.state.logger = None;
                Command::none()
            }
            Message::LoadCancelled => Command::none(),

            Message::EventsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.events, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::BookedEventsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.booked_events, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::GroupsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.groups, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::GroupDetailsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.group_details, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::FriendsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.friends, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::FriendEventsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = match self.state.friend_events.as_mut() {
                    Some(screen) => finish(current, screen, result),
                    None => None,
                };
                self.report_load_error(error);
                Command::none()
            }
            Message::FriendRequestsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.friend_requests, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::FindFriendsLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.find_friends, result);
                self.report_load_error(error);
                Command::none()
            }
            Message::ProfileLoaded(seq, result) => {
                let current = self.state.is_current(seq);
                let error = finish(current, &mut self.state.profile, result);
                self.report_load_error(error);
                Command::none()
            }

            // -- sign-in ------------------------------------------------------
            Message::SignIn(provider) => {
                self.state.login.start(provider);
                if self.state.login.authorize_url.is_some() {
                    self.state.log(
                        LogLevel::Info,
                        format!("Open the {} link in your browser, then paste the redirect URL", provider),
                    );
                }
                Command::none()
            }
            Message::CopyAuthorizeUrl => match &self.state.login.authorize_url {
                Some(url) => iced::clipboard::write(url.to_string()),
                None => Command::none(),
            },
            Message::RedirectInputChanged(value) => {
                self.state.login.redirect_input = value;
                Command::none()
            }
            Message::SubmitRedirect => match self.state.login.submit_redirect() {
                Some(pending) => {
                    let session = self.session.clone();
                    Command::perform(async move { pending.exchange(&session).await }, Message::SignInFinished)
                }
                None => Command::none(),
            },
            Message::CancelSignIn => {
                self.state.login.reset();
                Command::none()
            }
            Message::SignInFinished(result) => {
                self.state.login.finish(&result);
                match result {
                    Ok(()) => {
                        self.state.log(LogLevel::Success, "Signed in");
                        self.navigate(Route::Home)
                    }
                    Err(e) => {
                        self.state.log(LogLevel::Error, format!("Sign-in failed: {}", e));
                        Command::none()
                    }
                }
            }

            // -- events -------------------------------------------------------
            Message::BookEvent(index) => match self.state.events.event(index).cloned() {
                Some(event) => {
                    let session = self.session.clone();
                    self.state.log(LogLevel::Info, format!("Adding \"{}\"...", event.name));
                    Command::perform(
                        async move { EventsService::book_event(&session, &event).await },
                        Message::BookingDone,
                    )
                }
                None => Command::none(),
            },
            Message::GroupSelected(group) => {
                self.state.events.selected_group = Some(group);
                Command::none()
            }
            Message::AddToGroup(index) => {
                let Some(group) = self.state.events.selected_group.clone() else {
                    self.state.log(LogLevel::Warning, "Pick a group first");
                    return Command::none();
                };
                match self.state.events.event(index).cloned() {
                    Some(event) => {
                        let session = self.session.clone();
                        let group_id = group.group_id;
                        Command::perform(
                            async move { EventsService::add_event_to_group(&session, &event, group_id).await },
                            move |outcome| Message::GroupLinkDone(group_id, outcome),
                        )
                    }
                    None => Command::none(),
                }
            }
            Message::BookingDone(outcome) => {
                self.state.events.record_booking(&outcome);
                let level = if outcome.is_complete() { LogLevel::Success } else { LogLevel::Error };
                self.state.log(level, outcome.summary("Event added to your booked events"));
                Command::none()
            }
            Message::GroupLinkDone(group_id, outcome) => {
                self.state.events.record_group_link(&outcome, group_id);
                let level = match &outcome {
                    TwoPhaseOutcome::Completed { .. } => LogLevel::Success,
                    TwoPhaseOutcome::SecondFailed { .. } => LogLevel::Warning,
                    TwoPhaseOutcome::FirstFailed(_) => LogLevel::Error,
                };
                self.state.log(level, outcome.summary("Event added to group"));
                Command::none()
            }
            Message::RetryLink => match self.state.events.pending_link.clone() {
                Some(PendingLink::Booking(stored)) => {
                    let session = self.session.clone();
                    Command::perform(
                        async move { EventsService::retry_booking_link(&session, &stored).await.map(|_| ()) },
                        Message::RetryLinkDone,
                    )
                }
                Some(PendingLink::Group { stored, group_id }) => {
                    let session = self.session.clone();
                    Command::perform(
                        async move { EventsService::retry_group_link(&session, &stored, group_id).await },
                        Message::RetryLinkDone,
                    )
                }
                None => Command::none(),
            },
            Message::RetryLinkDone(result) => {
                match result {
                    Ok(()) => {
                        self.state.events.pending_link = None;
                        self.state.log(LogLevel::Success, "Event linked");
                    }
                    Err(e) => self.state.log(LogLevel::Error, format!("Retry failed: {}", e)),
                }
                Command::none()
            }

            // -- groups -------------------------------------------------------
            Message::GroupNameChanged(value) => {
                self.state.groups.new_group_name = value;
                Command::none()
            }
            Message::CreateGroup => match self.state.groups.pending_name() {
                Some(name) => {
                    let session = self.session.clone();
                    Command::perform(
                        async move { GroupsService::create(&session, &name).await },
                        Message::GroupCreated,
                    )
                }
                None => {
                    self.state.log(LogLevel::Warning, "Enter a group name");
                    Command::none()
                }
            },
            Message::GroupCreated(result) => match result {
                Ok(group) => {
                    self.state.groups.new_group_name.clear();
                    self.state.log(LogLevel::Success, format!("Group \"{}\" created", group.group_name));
                    self.navigate(Route::Groups)
                }
                Err(e) => {
                    self.state.log(LogLevel::Error, format!("Could not create group: {}", e));
                    Command::none()
                }
            },
            Message::JoinGroup(group_id) => {
                let session = self.session.clone();
                Command::perform(
                    async move { GroupsService::join(&session, group_id).await },
                    move |result| Message::GroupJoined(group_id, result),
                )
            }
            Message::GroupJoined(group_id, result) => {
                match result {
                    Ok(()) => self.state.log(LogLevel::Success, format!("Joined group {}", group_id)),
                    Err(e) => self.state.log(LogLevel::Error, format!("Could not join group: {}", e)),
                }
                Command::none()
            }

            // -- friends ------------------------------------------------------
            Message::AddFriend(index) => {
                let Some(user_id) = self.state.find_friends.press_add_friend(index) else {
                    return Command::none();
                };
                let session = self.session.clone();
                Command::perform(
                    async move { FriendsService::send_request(&session, user_id).await },
                    move |result| Message::FriendRequestSent(user_id, result),
                )
            }
            Message::FriendRequestSent(_, result) => {
                self.state.find_friends.request_finished();
                match result {
                    Ok(()) => {
                        self.state.log(LogLevel::Success, "Friend request sent");
                        if self.state.route == Route::FindFriends {
                            return self.navigate(Route::FindFriends);
                        }
                    }
                    Err(e) => self.state.log(LogLevel::Error, format!("Could not send friend request: {}", e)),
                }
                Command::none()
            }
            Message::RespondToRequest(friendship_id, action) => {
                if !self.state.friend_requests.press_respond(friendship_id) {
                    return Command::none();
                }
                let session = self.session.clone();
                Command::perform(
                    async move { FriendsService::respond(&session, friendship_id, action).await },
                    move |result| Message::RequestAnswered(friendship_id, action, result),
                )
            }
            Message::RequestAnswered(friendship_id, action, result) => {
                self.state.friend_requests.response_finished();
                match result {
                    Ok(_) => {
                        self.state.friend_requests.remove(friendship_id);
                        let (title, body) = response_alert(action);
                        self.state.log(LogLevel::Success, format!("{}: {}", title, body));
                    }
                    Err(e) => self.state.log(LogLevel::Error, format!("Could not update request: {}", e)),
                }
                Command::none()
            }

            // -- profile ------------------------------------------------------
            Message::SignOutPressed => {
                if !self.state.profile.press(ProfileAction::SignOut) {
                    self.state.log(LogLevel::Warning, "Press Sign out again to confirm");
                    return Command::none();
                }
                let session = self.session.clone();
                Command::perform(async move { session.sign_out().await }, Message::SignedOut)
            }
            Message::SignedOut(result) => {
                if let Err(e) = result {
                    self.state.log(LogLevel::Error, format!("Sign out failed: {}", e));
                    return Command::none();
                }
                self.state.log(LogLevel::Info, "Signed out");
                self.signed_out()
            }
            Message::DeleteAccountPressed => {
                if !self.state.profile.press(ProfileAction::DeleteAccount) {
                    self.state.log(
                        LogLevel::Warning,
                        "This permanently deletes your account. Press Delete account again to confirm",
                    );
                    return Command::none();
                }
                let session = self.session.clone();
                Command::perform(
                    async move { UsersService::delete_account(&session).await },
                    Message::AccountDeleted,
                )
            }
            Message::AccountDeleted(outcome) => {
                let (title, body) = outcome.alert();
                let level = if outcome == AccountDeletion::Deleted { LogLevel::Success } else { LogLevel::Error };
                self.state.log(level, format!("{}: {}", title, body));
                if outcome == AccountDeletion::Deleted {
                    self.signed_out()
                } else {
                    Command::none()
                }
            }
        }
    }

    fn view(&self) -> Element<Message> {
        crate::client::gui::views::layout::view(&self.state)
    }
}
