mod confirm_account;
mod create_account;

pub use confirm_account::ConfirmAccount;
pub use create_account::CreateAccount;

use iced::Task;

use facility_ui::widget::*;

use crate::change_facility::{context::Context, message::Message};

pub trait Step {
    fn update(&mut self, _message: Message) -> Task<Message> {
        Task::none()
    }
    fn view(&self, progress: (usize, usize)) -> Element<'_, Message>;
    fn load_context(&mut self, _ctx: &Context) {}
}
