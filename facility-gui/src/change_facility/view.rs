use iced::{widget::scrollable, Alignment, Length};

use facility_ui::{
    color,
    component::{
        button, form,
        text::{self, h3, p1_bold, p1_regular, p2_regular},
    },
    widget::*,
};

use crate::{
    account::{Field, NewAccount},
    change_facility::message::{self, Message},
};

fn label(field: Field) -> &'static str {
    match field {
        Field::FullName => "Full name",
        Field::Username => "Username",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm password",
    }
}

fn on_edit(field: Field) -> fn(String) -> Message {
    match field {
        Field::FullName => |s| message::CreateAccount::FullNameEdited(s).into(),
        Field::Username => |s| message::CreateAccount::UsernameEdited(s).into(),
        Field::Password => |s| message::CreateAccount::PasswordEdited(s).into(),
        Field::ConfirmPassword => |s| message::CreateAccount::ConfirmPasswordEdited(s).into(),
    }
}

pub fn create_account<'a>(
    progress: (usize, usize),
    banner: Option<String>,
    fields: Vec<(Field, &'a form::Value<String>)>,
    can_continue: bool,
) -> Element<'a, Message> {
    let submit = can_continue.then_some(Message::CreateAccount(message::CreateAccount::Continue));
    let forms = fields.into_iter().fold(
        Column::new().spacing(20),
        |col, (field, value)| {
            let input = match field {
                Field::Username => form::Form::new_trimmed(label(field), value, on_edit(field)),
                Field::Password | Field::ConfirmPassword => {
                    form::Form::new(label(field), value, on_edit(field)).secure()
                }
                Field::FullName => form::Form::new(label(field), value, on_edit(field)),
            };
            col.push(
                Column::new()
                    .spacing(10)
                    .push(p1_bold(label(field)))
                    .push(
                        input
                            .on_submit_maybe(submit.clone())
                            .size(text::P1_SIZE)
                            .padding(10),
                    ),
            )
        },
    );

    layout(
        progress,
        "Create a new account",
        Column::new()
            .push_maybe(banner.map(p1_regular))
            .push(forms)
            .push(
                button::primary("Continue")
                    .width(Length::Fixed(200.0))
                    .on_press_maybe(submit),
            )
            .spacing(50),
        Message::CreateAccount(message::CreateAccount::Back),
    )
}

pub fn confirm_account<'a>(
    progress: (usize, usize),
    facility_name: Option<&'a str>,
    account: Option<&'a NewAccount>,
) -> Element<'a, Message> {
    layout(
        progress,
        "Confirm your new account",
        Column::new()
            .push_maybe(facility_name.map(|name| {
                p1_regular(format!("Your account will be created in ‘{}’", name))
            }))
            .push_maybe(account.map(|account| {
                Column::new()
                    .spacing(10)
                    .push(
                        Row::new()
                            .spacing(10)
                            .push(p1_bold("Full name:"))
                            .push(p1_regular(&account.full_name)),
                    )
                    .push(
                        Row::new()
                            .spacing(10)
                            .push(p1_bold("Username:"))
                            .push(p1_regular(&account.username)),
                    )
                    .push_maybe(account.password.is_none().then(|| {
                        p2_regular("Learners of this facility sign in without a password")
                            .color(color::GREY_3)
                    }))
            }))
            .push(
                button::primary("Finish")
                    .width(Length::Fixed(200.0))
                    .on_press_maybe(account.map(|_| Message::Finish)),
            )
            .spacing(50),
        Message::Previous,
    )
}

fn layout<'a>(
    progress: (usize, usize),
    title: &'static str,
    content: impl Into<Element<'a, Message>>,
    previous_message: Message,
) -> Element<'a, Message> {
    let prev_button = button::transparent("Back").on_press(previous_message);
    Container::new(scrollable(
        Column::new()
            .width(Length::Fill)
            .push(Space::with_height(Length::Fixed(100.0)))
            .push(
                Row::new()
                    .align_y(Alignment::Center)
                    .push(Container::new(prev_button).center_x(Length::FillPortion(2)))
                    .push(Container::new(h3(title)).width(Length::FillPortion(8)))
                    .push_maybe(if progress.1 > 0 {
                        Some(
                            Container::new(p1_regular(format!("{} | {}", progress.0, progress.1)))
                                .center_x(Length::FillPortion(2)),
                        )
                    } else {
                        None
                    }),
            )
            .push(
                Row::new()
                    .push(Space::with_width(Length::FillPortion(2)))
                    .push(
                        Container::new(
                            Column::new()
                                .push(Space::with_height(Length::Fixed(100.0)))
                                .push(content),
                        )
                        .width(Length::FillPortion(8)),
                    )
                    .push(Space::with_width(Length::FillPortion(2))),
            ),
    ))
    .center_x(Length::Fill)
    .height(Length::Fill)
    .width(Length::Fill)
    .into()
}
