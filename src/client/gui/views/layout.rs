use iced::widget::{Button, Column, Container, Row, Scrollable, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::common::{bg_main_appearance, header_appearance, BOLD_FONT, TEXT_SECONDARY};
use crate::client::gui::views::logger::logger_view;
use crate::client::gui::views::{events, friends, groups, home, login, profile};
use crate::client::models::app_state::{AppState, Route};
use crate::client::models::messages::Message;

fn tab_bar(state: &AppState) -> Element<'_, Message> {
    let active = state.route.tab();
    let tabs = Route::TABS.iter().fold(Row::new().spacing(6), |row, (route, label)| {
        let style = if *route == active { iced::theme::Button::Primary } else { iced::theme::Button::Text };
        row.push(
            Button::new(Text::new(*label).size(14))
                .padding([6, 12])
                .style(style)
                .on_press(Message::Navigate(route.clone())),
        )
    });
    Container::new(
        Row::new()
            .spacing(16)
            .align_items(Alignment::Center)
            .push(Text::new("EventLink").font(BOLD_FONT).size(20))
            .push(tabs),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(header_appearance)))
    .into()
}

pub fn view(state: &AppState) -> Element<'_, Message> {
    let body: Element<Message> = if state.checking_session {
        Text::new("Checking session...").style(TEXT_SECONDARY).into()
    } else {
        match &state.route {
            Route::Home => home::view(),
            Route::Login => login::view(&state.login),
            Route::Events => events::view(&state.events),
            Route::BookedEvents => events::booked_view(&state.booked_events),
            Route::Groups => groups::view(&state.groups),
            Route::GroupDetails(_) => groups::details_view(&state.group_details),
            Route::Friends => friends::friends_view(&state.friends),
            Route::FriendEvents(_) => match &state.friend_events {
                Some(screen) => friends::friend_events_view(screen),
                None => Text::new("").into(),
            },
            Route::FriendRequests => friends::requests_view(&state.friend_requests),
            Route::FindFriends => friends::find_view(&state.find_friends),
            Route::Profile => profile::view(&state.profile),
        }
    };

    let mut page = Column::new();
    if state.route != Route::Login && !state.checking_session {
        page = page.push(tab_bar(state));
    }
    page = page
        .push(Container::new(logger_view(state.logger.as_ref())).padding([8, 16, 0, 16]))
        .push(Scrollable::new(Container::new(body).padding(20).width(Length::Fill)).height(Length::Fill));

    Container::new(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}
