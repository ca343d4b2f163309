use iced::widget::text_input;
use iced::{Border, Length, Theme};

use crate::{color, component::text, widget::*};

/// The value of a text field and whether it satisfies its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value<T> {
    pub value: T,
    pub warning: Option<&'static str>,
    pub valid: bool,
}

impl std::default::Default for Value<String> {
    fn default() -> Self {
        Self {
            value: "".to_string(),
            warning: None,
            valid: true,
        }
    }
}

pub struct Form<'a, Message> {
    input: TextInput<'a, Message>,
    warning: Option<&'a str>,
    valid: bool,
}

impl<'a, Message: 'a> Form<'a, Message>
where
    Message: Clone,
{
    /// Creates a new [`Form`].
    ///
    /// It expects:
    /// - a placeholder
    /// - the current value
    /// - a function that produces a message when the [`Form`] changes
    pub fn new<F>(placeholder: &str, value: &'a Value<String>, on_change: F) -> Self
    where
        F: 'static + Fn(String) -> Message,
    {
        Self {
            input: TextInput::new(placeholder, &value.value).on_input(on_change),
            warning: value.warning,
            valid: value.valid,
        }
    }

    /// Creates a new [`Form`] that trims input values before applying the `on_change` function.
    pub fn new_trimmed<F>(placeholder: &str, value: &'a Value<String>, on_change: F) -> Self
    where
        F: 'static + Fn(String) -> Message,
    {
        Self {
            input: TextInput::new(placeholder, &value.value)
                .on_input(move |s| on_change(s.trim().to_string())),
            warning: value.warning,
            valid: value.valid,
        }
    }

    /// Hides the characters of the input, for passwords.
    pub fn secure(mut self) -> Self {
        self.input = self.input.secure(true);
        self
    }

    /// Sets the message produced when the user presses enter in the input.
    pub fn on_submit_maybe(mut self, message: Option<Message>) -> Self {
        self.input = self.input.on_submit_maybe(message);
        self
    }

    /// Sets the padding of the [`Form`].
    pub fn padding(mut self, units: u16) -> Self {
        self.input = self.input.padding(units);
        self
    }

    /// Sets the [`Form`] with a text size
    pub fn size(mut self, size: u16) -> Self {
        self.input = self.input.size(size);
        self
    }
}

fn invalid(theme: &Theme, status: text_input::Status) -> text_input::Style {
    let style = text_input::default(theme, status);
    text_input::Style {
        border: Border {
            color: color::RED,
            ..style.border
        },
        ..style
    }
}

impl<'a, Message: 'a + Clone> From<Form<'a, Message>> for Element<'a, Message> {
    fn from(form: Form<'a, Message>) -> Element<'a, Message> {
        Container::new(
            Column::new()
                .push(if !form.valid {
                    form.input.style(invalid)
                } else {
                    form.input
                })
                .push_maybe(if !form.valid {
                    form.warning
                        .map(|message| text::caption(message).color(color::RED))
                } else {
                    None
                })
                .width(Length::Fill)
                .spacing(5),
        )
        .width(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_is_empty_and_valid() {
        let value = Value::<String>::default();
        assert!(value.value.is_empty());
        assert!(value.valid);
        assert!(value.warning.is_none());
    }
}
