use iced::widget::{Button, Column, Container, Row as WidgetRow, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::models::load_state::LoadState;
use crate::client::models::messages::Message;
use crate::client::screens::Screen;

pub const BG_MAIN: Color = Color::from_rgb(0.04, 0.16, 0.08);
pub const CARD_BG: Color = Color::from_rgb(0.07, 0.24, 0.12);
pub const HEADER_BG: Color = Color::from_rgb(0.03, 0.12, 0.06);
pub const ACCENT: Color = Color::from_rgb(0.3, 0.85, 0.5);
pub const TEXT_PRIMARY: Color = Color::WHITE;
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.75, 0.8, 0.75);
pub const TEXT_ERROR: Color = Color::from_rgb(1.0, 0.45, 0.45);

pub const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn bg_main_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn header_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(HEADER_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border { width: 0.0, color: Color::TRANSPARENT, radius: 0.0.into() },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
        },
    }
}

pub fn card_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border { width: 1.0, color: Color::from_rgb(0.15, 0.35, 0.2), radius: 12.0.into() },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 6.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
        },
    }
}

pub fn card<'a>(content: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    Container::new(content)
        .padding(16)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
}

/// Button that is only clickable when `message` is set.
pub fn action_button<'a>(label: &str, message: Option<Message>, style: iced::theme::Button) -> Button<'a, Message> {
    let button = Button::new(Text::new(label.to_string()).size(14)).padding([6, 12]).style(style);
    match message {
        Some(message) => button.on_press(message),
        None => button,
    }
}

/// Title, state text and one card per row. `actions(i)` supplies the
/// buttons for the i-th row, if any.
pub fn screen_body<'a, S, F>(screen: &S, actions: F) -> Element<'a, Message>
where
    S: Screen,
    F: Fn(usize) -> Option<Element<'a, Message>>,
{
    let mut column = Column::new()
        .spacing(12)
        .push(Text::new(screen.title()).font(BOLD_FONT).size(26).style(TEXT_PRIMARY));
    if let Some(subtitle) = screen.subtitle() {
        column = column.push(Text::new(subtitle).size(14).style(TEXT_SECONDARY));
    }

    match screen.state() {
        LoadState::Loading => {
            column = column.push(Text::new(screen.loading_text()).size(16).style(TEXT_SECONDARY));
        }
        LoadState::Failed(error) => {
            let lines = screen
                .error_lines(error)
                .into_iter()
                .fold(Column::new().spacing(6), |col, line| col.push(Text::new(line).style(TEXT_ERROR)));
            column = column.push(card(
                Column::new()
                    .spacing(10)
                    .push(lines)
                    .push(action_button("Try again", Some(Message::Refresh), iced::theme::Button::Secondary)),
            ));
        }
        LoadState::Loaded(data) => {
            let rows = screen.rows(data);
            if rows.is_empty() {
                let empty = screen.empty_state();
                let mut body = Column::new()
                    .spacing(6)
                    .align_items(Alignment::Center)
                    .push(Text::new(empty.title).font(BOLD_FONT).size(18));
                if let Some(text) = empty.body {
                    body = body.push(Text::new(text).size(14).style(TEXT_SECONDARY));
                }
                column = column.push(card(Container::new(body).width(Length::Fill).center_x()));
            }
            for (index, row) in rows.into_iter().enumerate() {
                let details = row.lines.into_iter().fold(
                    Column::new().spacing(4).push(Text::new(row.title).font(BOLD_FONT).size(17)),
                    |col, line| col.push(Text::new(line).size(14).style(TEXT_SECONDARY)),
                );
                let mut line = WidgetRow::new()
                    .spacing(12)
                    .align_items(Alignment::Center)
                    .push(Container::new(details).width(Length::Fill));
                if let Some(buttons) = actions(index) {
                    line = line.push(buttons);
                }
                column = column.push(card(line));
            }
        }
    }
    column.into()
}

pub fn spacer(height: f32) -> Space {
    Space::new(Length::Fill, Length::Fixed(height))
}
