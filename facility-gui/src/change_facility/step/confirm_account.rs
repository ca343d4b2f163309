use facility_ui::widget::*;

use crate::{
    account::NewAccount,
    change_facility::{context::Context, message::Message, step::Step, view},
};

/// Summary of the account that will be created in the target facility.
#[derive(Default)]
pub struct ConfirmAccount {
    facility_name: Option<String>,
    account: Option<NewAccount>,
}

impl Step for ConfirmAccount {
    fn load_context(&mut self, ctx: &Context) {
        self.facility_name = ctx.facility_name().map(str::to_string);
        self.account.clone_from(&ctx.new_account);
    }

    fn view(&self, progress: (usize, usize)) -> Element<'_, Message> {
        view::confirm_account(
            progress,
            self.facility_name.as_deref(),
            self.account.as_ref(),
        )
    }
}

impl From<ConfirmAccount> for Box<dyn Step> {
    fn from(s: ConfirmAccount) -> Box<dyn Step> {
        Box::new(s)
    }
}
