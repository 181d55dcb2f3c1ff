use iced::widget::{text_input, Column, Row};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::common::{action_button, card, screen_body};
use crate::client::models::app_state::Route;
use crate::client::models::messages::Message;
use crate::client::screens::group_details::GroupDetailsScreen;
use crate::client::screens::groups::GroupsScreen;

pub fn view(screen: &GroupsScreen) -> Element<'_, Message> {
    let create = card(
        Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(
                text_input("New group name", &screen.new_group_name)
                    .on_input(Message::GroupNameChanged)
                    .on_submit(Message::CreateGroup)
                    .padding(8)
                    .width(Length::Fill),
            )
            .push(action_button(
                "Create",
                screen.pending_name().map(|_| Message::CreateGroup),
                iced::theme::Button::Primary,
            )),
    );

    let ids: Vec<i64> = screen.state.data().map(|g| g.iter().map(|g| g.group_id).collect()).unwrap_or_default();
    let body = screen_body(screen, move |index| {
        let group_id = *ids.get(index)?;
        Some(
            Row::new()
                .spacing(8)
                .push(action_button("Open", Some(Message::Navigate(Route::GroupDetails(group_id))), iced::theme::Button::Secondary))
                .push(action_button("Join", Some(Message::JoinGroup(group_id)), iced::theme::Button::Primary))
                .into(),
        )
    });
    Column::new().spacing(12).push(create).push(body).into()
}

pub fn details_view(screen: &GroupDetailsScreen) -> Element<'_, Message> {
    Column::new()
        .spacing(12)
        .push(action_button("← Groups", Some(Message::Navigate(Route::Groups)), iced::theme::Button::Text))
        .push(screen_body(screen, |_| None))
        .into()
}
