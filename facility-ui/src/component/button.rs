use super::text::{text, BOLD};
use crate::widget::*;
use iced::widget::{button, container};
use iced::{alignment::Horizontal, Alignment, Length};

pub fn primary<'a, T: 'a>(t: &'static str) -> Button<'a, T> {
    Button::new(content(
        text(t)
            .font(BOLD)
            .align_y(Alignment::Center)
            .align_x(Alignment::Center),
    ))
    .style(button::primary)
}

pub fn transparent<'a, T: 'a>(t: &'static str) -> Button<'a, T> {
    Button::new(content(text(t).align_y(Alignment::Center))).style(button::text)
}

fn content<'a, T: 'a>(text: Text<'a>) -> Container<'a, T> {
    container(text)
        .width(Length::Fill)
        .align_x(Horizontal::Center)
        .padding(5)
}
