use iced::widget::{Button, Container, Row, Text};
use iced::{Alignment, Element, Font, Length};

use crate::client::models::messages::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

/// Result of the last user action, shown in the bar above the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn emoji(&self) -> &'static str {
        match self.level {
            LogLevel::Success => "✅",
            LogLevel::Error => "❌",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
        }
    }

    pub fn color(&self) -> iced::Color {
        match self.level {
            LogLevel::Success => iced::Color::from_rgb(0.2, 0.7, 0.4),
            LogLevel::Error => iced::Color::from_rgb(0.85, 0.2, 0.2),
            LogLevel::Info => iced::Color::from_rgb(0.2, 0.5, 0.9),
            LogLevel::Warning => iced::Color::from_rgb(0.85, 0.65, 0.0),
        }
    }
}

pub fn logger_view(log: Option<&LogMessage>) -> Element<'_, Message> {
    let Some(log) = log else {
        return iced::widget::Space::new(Length::Fill, Length::Fixed(0.0)).into();
    };
    let bg_color = log.color();
    Container::new(
        Row::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(Text::new(log.emoji()).font(Font::with_name("Segoe UI Emoji")).size(18))
            .push(Container::new(Text::new(&log.message).size(16)).width(Length::Fill))
            .push(
                Button::new(Text::new("✕").size(14))
                    .style(iced::theme::Button::Text)
                    .on_press(Message::ClearLog),
            ),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg_color)),
            text_color: Some(iced::Color::WHITE),
            border: iced::Border { radius: 8.0.into(), ..Default::default() },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 12.0,
                color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            },
        }
    })))
    .into()
}
