use iced::widget::{pick_list, Column, Row, Text};
use iced::{Alignment, Element};

use crate::client::gui::views::common::{action_button, card, screen_body, TEXT_SECONDARY};
use crate::client::models::messages::Message;
use crate::client::screens::booked_events::BookedEventsScreen;
use crate::client::screens::events::EventsScreen;

pub fn view(screen: &EventsScreen) -> Element<'_, Message> {
    let groups = screen.state.data().map(|d| d.groups.clone()).unwrap_or_default();
    let has_group = screen.selected_group.is_some();

    let picker = Row::new()
        .spacing(10)
        .align_items(Alignment::Center)
        .push(Text::new("Add to group:").size(14).style(TEXT_SECONDARY))
        .push(pick_list(groups, screen.selected_group.clone(), Message::GroupSelected).placeholder("Choose a group"));

    let mut column = Column::new().spacing(12);
    if let Some(link) = &screen.pending_link {
        column = column.push(card(
            Row::new()
                .spacing(12)
                .align_items(Alignment::Center)
                .push(Text::new(link.describe()).size(14))
                .push(action_button("Retry", Some(Message::RetryLink), iced::theme::Button::Primary)),
        ));
    }

    let body = screen_body(screen, |index| {
        Some(
            Row::new()
                .spacing(8)
                .push(action_button("Add Event", Some(Message::BookEvent(index)), iced::theme::Button::Primary))
                .push(action_button(
                    "Add to Group",
                    has_group.then_some(Message::AddToGroup(index)),
                    iced::theme::Button::Secondary,
                ))
                .into(),
        )
    });
    column.push(picker).push(body).into()
}

pub fn booked_view(screen: &BookedEventsScreen) -> Element<'_, Message> {
    screen_body(screen, |_| None)
}
