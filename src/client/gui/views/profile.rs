use iced::widget::{Column, Row};
use iced::Element;

use crate::client::gui::views::common::{action_button, screen_body};
use crate::client::models::app_state::Route;
use crate::client::models::messages::Message;
use crate::client::screens::profile::{ProfileAction, ProfileScreen};

pub fn view(screen: &ProfileScreen) -> Element<'_, Message> {
    let sign_out = if screen.armed == Some(ProfileAction::SignOut) { "Confirm sign out" } else { "Sign out" };
    let delete =
        if screen.armed == Some(ProfileAction::DeleteAccount) { "Confirm delete account" } else { "Delete account" };

    Column::new()
        .spacing(12)
        .push(screen_body(screen, |_| None))
        .push(action_button(
            "View friend requests",
            Some(Message::Navigate(Route::FriendRequests)),
            iced::theme::Button::Secondary,
        ))
        .push(
            Row::new()
                .spacing(10)
                .push(action_button(sign_out, Some(Message::SignOutPressed), iced::theme::Button::Secondary))
                .push(action_button(delete, Some(Message::DeleteAccountPressed), iced::theme::Button::Destructive)),
        )
        .into()
}
