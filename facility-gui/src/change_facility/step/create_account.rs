use std::collections::HashSet;

use iced::Task;
use tracing::debug;

use facility_ui::{component::form, widget::*};

use crate::{
    account::{self, AccountDraft, Field, NewAccount, Validity},
    change_facility::{
        context::Context,
        event::{Event, EventSender},
        message::{self, Message},
        step::Step,
        view,
    },
    facility::TargetFacility,
};

/// Form of the new local account created when joining the target facility.
///
/// It only talks to the flow controller through its [`EventSender`]: one `Back` or one
/// `Continue` per user action.
pub struct CreateAccount {
    target_facility: Option<TargetFacility>,
    sender: Box<dyn EventSender>,

    full_name: form::Value<String>,
    username: form::Value<String>,
    password: form::Value<String>,
    confirm_password: form::Value<String>,
    // Warnings are only displayed for these fields.
    touched: HashSet<Field>,
}

impl CreateAccount {
    pub fn new(
        target_facility: Option<TargetFacility>,
        sender: impl EventSender + 'static,
    ) -> Self {
        Self {
            target_facility,
            sender: Box::new(sender),
            full_name: form::Value::default(),
            username: form::Value::default(),
            password: form::Value::default(),
            confirm_password: form::Value::default(),
            touched: HashSet::new(),
        }
    }

    pub fn password_required(&self) -> bool {
        TargetFacility::password_required(self.target_facility.as_ref())
    }

    /// Fields displayed by the form, in order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::FullName, Field::Username];
        if self.password_required() {
            fields.extend([Field::Password, Field::ConfirmPassword]);
        }
        fields
    }

    pub fn banner(&self) -> Option<String> {
        self.target_facility
            .as_ref()
            .and_then(|facility| facility.name.as_ref())
            .filter(|name| !name.is_empty())
            .map(|name| format!("New account for ‘{}’ learning facility", name))
    }

    pub fn value(&self, field: Field) -> &form::Value<String> {
        match field {
            Field::FullName => &self.full_name,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut form::Value<String> {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn draft(&self) -> AccountDraft {
        let mut draft = AccountDraft::default();
        for field in self.fields() {
            draft.set(field, self.value(field).value.clone());
        }
        draft
    }

    pub fn validity(&self) -> Validity {
        Validity::check(&self.draft(), self.password_required())
    }

    pub fn can_continue(&self) -> bool {
        account::is_valid(&self.draft(), self.target_facility.as_ref())
    }

    fn edit(&mut self, field: Field, value: String) {
        self.value_mut(field).value = value;
        self.touched.insert(field);
        self.refresh();
    }

    fn refresh(&mut self) {
        let validity = self.validity();
        for field in self.fields() {
            let error = if self.touched.contains(&field) {
                validity.error(field)
            } else {
                None
            };
            let value = self.value_mut(field);
            value.valid = error.is_none();
            value.warning = error.map(|e| e.warning());
        }
    }

    fn restore(&mut self, draft: AccountDraft) {
        for field in [
            Field::FullName,
            Field::Username,
            Field::Password,
            Field::ConfirmPassword,
        ] {
            *self.value_mut(field) = form::Value {
                value: draft.get(field).to_string(),
                ..form::Value::default()
            };
        }
        self.touched.clear();
    }

    fn back(&self) {
        debug!("Account form: back");
        self.sender.send(Event::Back);
    }

    fn submit(&mut self) {
        match NewAccount::from_draft(self.draft(), self.target_facility.as_ref()) {
            Ok(account) => {
                debug!("Account form: continue with {:?}", account);
                self.restore(AccountDraft::default());
                self.sender.send(Event::Continue(account));
            }
            Err(validity) => {
                debug!("Account form is invalid: {:?}", validity);
                let fields = self.fields();
                self.touched.extend(fields);
                self.refresh();
            }
        }
    }
}

impl Step for CreateAccount {
    fn load_context(&mut self, ctx: &Context) {
        if let Some(account) = &ctx.new_account {
            self.restore(AccountDraft::from(account));
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::CreateAccount(msg) = message {
            match msg {
                message::CreateAccount::FullNameEdited(value) => {
                    self.edit(Field::FullName, value)
                }
                message::CreateAccount::UsernameEdited(value) => {
                    self.edit(Field::Username, value)
                }
                message::CreateAccount::PasswordEdited(value) => {
                    self.edit(Field::Password, value)
                }
                message::CreateAccount::ConfirmPasswordEdited(value) => {
                    self.edit(Field::ConfirmPassword, value)
                }
                message::CreateAccount::Back => self.back(),
                message::CreateAccount::Continue => self.submit(),
            }
        }
        Task::none()
    }

    fn view(&self, progress: (usize, usize)) -> Element<'_, Message> {
        view::create_account(
            progress,
            self.banner(),
            self.fields()
                .into_iter()
                .map(|field| (field, self.value(field)))
                .collect(),
            self.can_continue(),
        )
    }
}

impl From<CreateAccount> for Box<dyn Step> {
    fn from(s: CreateAccount) -> Box<dyn Step> {
        Box::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    fn facility(learner_can_login_with_no_password: Option<bool>) -> TargetFacility {
        TargetFacility {
            id: None,
            name: Some("Test Facility".to_string()),
            learner_can_login_with_no_password,
        }
    }

    fn form(facility: Option<TargetFacility>) -> (CreateAccount, channel::Receiver<Event>) {
        let (sender, receiver) = channel::unbounded();
        (CreateAccount::new(facility, sender), receiver)
    }

    fn send(step: &mut CreateAccount, msg: message::CreateAccount) {
        let _ = step.update(Message::CreateAccount(msg));
    }

    fn fill(step: &mut CreateAccount, password: &str) {
        send(
            step,
            message::CreateAccount::FullNameEdited("Test Fullname".to_string()),
        );
        send(
            step,
            message::CreateAccount::UsernameEdited("testusername".to_string()),
        );
        send(
            step,
            message::CreateAccount::PasswordEdited(password.to_string()),
        );
        send(
            step,
            message::CreateAccount::ConfirmPasswordEdited(password.to_string()),
        );
    }

    #[test]
    fn test_banner() {
        let (step, _) = form(Some(facility(None)));
        assert_eq!(
            step.banner().as_deref(),
            Some("New account for ‘Test Facility’ learning facility")
        );
        let (step, _) = form(Some(TargetFacility::default()));
        assert_eq!(step.banner(), None);
        let (step, _) = form(Some(TargetFacility {
            name: Some(String::new()),
            ..Default::default()
        }));
        assert_eq!(step.banner(), None);
        let (step, _) = form(None);
        assert_eq!(step.banner(), None);
    }

    #[test]
    fn test_password_fields_follow_facility() {
        let all = vec![
            Field::FullName,
            Field::Username,
            Field::Password,
            Field::ConfirmPassword,
        ];
        let (step, _) = form(Some(facility(Some(true))));
        assert_eq!(step.fields(), vec![Field::FullName, Field::Username]);
        let (step, _) = form(Some(facility(Some(false))));
        assert_eq!(step.fields(), all);
        let (step, _) = form(Some(facility(None)));
        assert_eq!(step.fields(), all);
        let (step, _) = form(None);
        assert_eq!(step.fields(), all);
    }

    #[test]
    fn test_back_is_unconditional() {
        let (mut step, events) = form(None);
        send(&mut step, message::CreateAccount::Back);
        assert_eq!(events.try_iter().collect::<Vec<_>>(), vec![Event::Back]);

        fill(&mut step, "testpassword");
        send(&mut step, message::CreateAccount::Back);
        assert_eq!(events.try_iter().collect::<Vec<_>>(), vec![Event::Back]);
        // Going back does not touch the draft.
        assert!(step.can_continue());
    }

    #[test]
    fn test_continue_on_empty_form() {
        let (mut step, events) = form(None);
        assert!(!step.can_continue());
        send(&mut step, message::CreateAccount::Continue);
        assert!(events.try_recv().is_err());
        // Every field now tells the user what is wrong.
        for field in step.fields() {
            assert!(!step.value(field).valid);
            assert_eq!(step.value(field).warning, Some("This field is required"));
        }
    }

    #[test]
    fn test_continue_on_valid_form() {
        let (mut step, events) = form(None);
        fill(&mut step, "testpassword");
        assert!(step.can_continue());
        send(&mut step, message::CreateAccount::Continue);
        assert_eq!(
            events.try_iter().collect::<Vec<_>>(),
            vec![Event::Continue(NewAccount {
                full_name: "Test Fullname".to_string(),
                username: "testusername".to_string(),
                password: Some("testpassword".to_string()),
            })]
        );
        // The draft now belongs to the flow controller.
        assert_eq!(step.draft(), AccountDraft::default());
    }

    #[test]
    fn test_continue_without_password() {
        let (mut step, events) = form(Some(facility(Some(true))));
        send(
            &mut step,
            message::CreateAccount::FullNameEdited("Test Fullname".to_string()),
        );
        send(
            &mut step,
            message::CreateAccount::UsernameEdited("testusername".to_string()),
        );
        assert!(step.can_continue());
        send(&mut step, message::CreateAccount::Continue);
        assert_eq!(
            events.try_iter().collect::<Vec<_>>(),
            vec![Event::Continue(NewAccount {
                full_name: "Test Fullname".to_string(),
                username: "testusername".to_string(),
                password: None,
            })]
        );

        let (mut step, events) = form(Some(facility(Some(false))));
        send(
            &mut step,
            message::CreateAccount::FullNameEdited("Test Fullname".to_string()),
        );
        send(
            &mut step,
            message::CreateAccount::UsernameEdited("testusername".to_string()),
        );
        assert!(!step.can_continue());
        send(&mut step, message::CreateAccount::Continue);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_password_mismatch() {
        let (mut step, events) = form(None);
        fill(&mut step, "testpassword");
        send(
            &mut step,
            message::CreateAccount::ConfirmPasswordEdited("testpasswort".to_string()),
        );
        assert!(!step.can_continue());
        assert_eq!(
            step.value(Field::ConfirmPassword).warning,
            Some("Passwords do not match")
        );
        send(&mut step, message::CreateAccount::Continue);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_warnings_only_on_edited_fields() {
        let (mut step, _) = form(None);
        send(
            &mut step,
            message::CreateAccount::UsernameEdited("test user".to_string()),
        );
        assert!(!step.value(Field::Username).valid);
        assert!(step.value(Field::FullName).valid);
        assert!(step.value(Field::Password).valid);

        send(
            &mut step,
            message::CreateAccount::UsernameEdited("testuser".to_string()),
        );
        assert!(step.value(Field::Username).valid);
        assert!(step.value(Field::Username).warning.is_none());
    }

    #[test]
    fn test_every_edit_is_validated_immediately() {
        let (mut step, _) = form(None);
        fill(&mut step, "testpassword");
        assert!(step.can_continue());
        send(
            &mut step,
            message::CreateAccount::FullNameEdited("  ".to_string()),
        );
        assert!(!step.can_continue());
        send(
            &mut step,
            message::CreateAccount::FullNameEdited("Test Fullname".to_string()),
        );
        assert!(step.can_continue());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let (mut step, events) = form(Some(facility(None)));
        send(
            &mut step,
            message::CreateAccount::FullNameEdited("Test Fullname".to_string()),
        );
        send(
            &mut step,
            message::CreateAccount::UsernameEdited("test user".to_string()),
        );
        let touched = step.touched.clone();
        let warnings: Vec<_> = step.fields().iter().map(|f| step.value(*f).clone()).collect();
        let fields = step.fields();
        let validity = step.validity();
        let banner = step.banner();

        for _ in 0..3 {
            drop(step.view((1, 2)));
            assert!(!step.can_continue());
        }

        assert_eq!(step.touched, touched);
        assert_eq!(
            step.fields().iter().map(|f| step.value(*f).clone()).collect::<Vec<_>>(),
            warnings
        );
        assert_eq!(step.fields(), fields);
        assert_eq!(step.validity(), validity);
        assert_eq!(step.banner(), banner);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_form_survives_flow_controller_loss() {
        let (mut step, events) = form(None);
        drop(events);
        send(&mut step, message::CreateAccount::Back);
        send(&mut step, message::CreateAccount::Continue);
        fill(&mut step, "testpassword");
        send(&mut step, message::CreateAccount::Continue);
        // The accepted draft is handed over even if nobody listens anymore.
        assert_eq!(step.draft(), AccountDraft::default());
    }

    #[test]
    fn test_restore_accepted_account() {
        let (mut step, _) = form(None);
        let ctx = Context {
            target_facility: None,
            new_account: Some(NewAccount {
                full_name: "Test Fullname".to_string(),
                username: "testusername".to_string(),
                password: Some("testpassword".to_string()),
            }),
        };
        step.load_context(&ctx);
        assert_eq!(step.value(Field::Username).value, "testusername");
        assert!(step.can_continue());

        // Nothing to restore on first display.
        let (mut step, _) = form(None);
        step.load_context(&Context::default());
        assert_eq!(step.draft(), AccountDraft::default());
    }
}
