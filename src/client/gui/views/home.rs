use iced::widget::{Column, Text};
use iced::Element;

use crate::client::gui::views::common::{card, BOLD_FONT, TEXT_SECONDARY};
use crate::client::models::messages::Message;
use crate::client::screens::home::{HomeScreen, FEATURES};

pub fn view<'a>() -> Element<'a, Message> {
    FEATURES.iter().fold(
        Column::new().spacing(16).push(Text::new(HomeScreen.title()).font(BOLD_FONT).size(30)),
        |col, (heading, body)| {
            col.push(card(
                Column::new()
                    .spacing(6)
                    .push(Text::new(*heading).font(BOLD_FONT).size(18))
                    .push(Text::new(*body).size(14).style(TEXT_SECONDARY)),
            ))
        },
    )
    .into()
}
