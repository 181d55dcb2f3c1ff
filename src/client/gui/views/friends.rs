use iced::widget::{Column, Row};
use iced::Element;

use crate::client::gui::views::common::{action_button, screen_body};
use crate::client::models::app_state::Route;
use crate::client::models::messages::Message;
use crate::client::screens::find_friends::FindFriendsScreen;
use crate::client::screens::friend_events::FriendEventsScreen;
use crate::client::screens::friend_requests::FriendRequestsScreen;
use crate::client::screens::friends::FriendsScreen;
use crate::common::models::FriendshipAction;

pub fn friends_view(screen: &FriendsScreen) -> Element<'_, Message> {
    let friends = screen.state.data().cloned().unwrap_or_default();
    screen_body(screen, move |index| {
        let friend = friends.get(index)?.clone();
        Some(action_button("Events", Some(Message::Navigate(Route::FriendEvents(friend))), iced::theme::Button::Secondary).into())
    })
}

pub fn friend_events_view(screen: &FriendEventsScreen) -> Element<'_, Message> {
    Column::new()
        .spacing(12)
        .push(action_button("← Friends", Some(Message::Navigate(Route::Friends)), iced::theme::Button::Text))
        .push(screen_body(screen, |_| None))
        .into()
}

pub fn requests_view(screen: &FriendRequestsScreen) -> Element<'_, Message> {
    let ids: Vec<i64> =
        screen.state.data().map(|r| r.iter().map(|r| r.friendship.id).collect()).unwrap_or_default();
    let busy = screen.acting_on.is_some();
    let body = screen_body(screen, move |index| {
        let id = *ids.get(index)?;
        Some(
            Row::new()
                .spacing(8)
                .push(action_button(
                    "Accept",
                    (!busy).then_some(Message::RespondToRequest(id, FriendshipAction::Accept)),
                    iced::theme::Button::Primary,
                ))
                .push(action_button(
                    "Reject",
                    (!busy).then_some(Message::RespondToRequest(id, FriendshipAction::Reject)),
                    iced::theme::Button::Destructive,
                ))
                .into(),
        )
    });
    Column::new()
        .spacing(12)
        .push(action_button("← Profile", Some(Message::Navigate(Route::Profile)), iced::theme::Button::Text))
        .push(body)
        .into()
}

pub fn find_view(screen: &FindFriendsScreen) -> Element<'_, Message> {
    let busy = screen.sending_to.is_some();
    screen_body(screen, move |index| {
        Some(action_button("Add friend", (!busy).then_some(Message::AddFriend(index)), iced::theme::Button::Primary).into())
    })
}
