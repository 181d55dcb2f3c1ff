use iced::widget::{text_input, Column, Container, Row, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::views::common::{action_button, card, BOLD_FONT, TEXT_ERROR, TEXT_SECONDARY};
use crate::client::models::messages::Message;
use crate::client::screens::login::LoginScreen;
use crate::client::services::oauth::OAuthProvider;

pub fn view(screen: &LoginScreen) -> Element<'_, Message> {
    let busy = screen.is_busy();
    let providers = OAuthProvider::ALL.iter().fold(Column::new().spacing(10), |col, provider| {
        col.push(
            action_button(
                &provider.button_text(),
                (!busy).then_some(Message::SignIn(*provider)),
                iced::theme::Button::Primary,
            )
            .width(Length::Fixed(260.0)),
        )
    });

    let mut column = Column::new()
        .spacing(16)
        .align_items(Alignment::Center)
        .push(Text::new("EventLink").font(BOLD_FONT).size(34))
        .push(Text::new("Sign in to continue").size(16).style(TEXT_SECONDARY))
        .push(providers);

    if let Some(url) = &screen.authorize_url {
        let paste = text_input("Paste the redirect URL here", &screen.redirect_input)
            .on_input(Message::RedirectInputChanged)
            .on_submit(Message::SubmitRedirect)
            .padding(10);
        column = column.push(card(
            Column::new()
                .spacing(10)
                .push(Text::new("Open this link in your browser and approve access:").size(14))
                .push(Text::new(url.to_string()).size(12).style(TEXT_SECONDARY))
                .push(paste)
                .push(
                    Row::new()
                        .spacing(8)
                        .push(action_button("Copy link", Some(Message::CopyAuthorizeUrl), iced::theme::Button::Secondary))
                        .push(action_button(
                            "Continue",
                            (!busy && !screen.redirect_input.trim().is_empty()).then_some(Message::SubmitRedirect),
                            iced::theme::Button::Primary,
                        ))
                        .push(action_button("Cancel", Some(Message::CancelSignIn), iced::theme::Button::Text)),
                ),
        ));
    }
    if busy {
        column = column.push(Text::new("Signing in...").style(TEXT_SECONDARY));
    }
    if let Some(notice) = &screen.notice {
        column = column.push(Text::new(notice.clone()).style(TEXT_ERROR));
    }

    Container::new(column).width(Length::Fill).center_x().into()
}
