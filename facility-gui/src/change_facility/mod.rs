//! Minimal host of the "Change facility" flow: it mounts the account form, reacts to the
//! events the form sends and keeps the accepted account in its context.
mod context;
mod event;
mod message;
mod step;
mod view;

pub use context::Context;
pub use event::{Event, EventSender};
pub use message::{CreateAccount as CreateAccountMessage, Message};
pub use step::{ConfirmAccount, CreateAccount, Step};

use crossbeam::channel;
use iced::Task;
use tracing::{debug, info};

use facility_ui::widget::Element;

use crate::{account::NewAccount, facility::TargetFacility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user went back from the first step.
    Cancelled,
    Completed(NewAccount),
}

pub struct ChangeFacility {
    current: usize,
    steps: Vec<Box<dyn Step>>,
    events: channel::Receiver<Event>,
    outcome: Option<Outcome>,

    /// Context is data passed through each step.
    context: Context,
}

impl ChangeFacility {
    pub fn new(target_facility: Option<TargetFacility>) -> Self {
        let (sender, events) = channel::unbounded();
        let context = Context::new(target_facility.clone());
        let mut flow = Self {
            current: 0,
            steps: vec![
                CreateAccount::new(target_facility, sender).into(),
                ConfirmAccount::default().into(),
            ],
            events,
            outcome: None,
            context,
        };
        flow.load_current();
        flow
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn current_step(&mut self) -> &mut dyn Step {
        self.steps
            .get_mut(self.current)
            .expect("There is always a step")
            .as_mut()
    }

    fn load_current(&mut self) {
        let ctx = self.context.clone();
        self.current_step().load_context(&ctx);
    }

    fn previous(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            info!("Change facility: back to step {}", self.current);
            self.load_current();
        } else {
            info!("Change facility: cancelled");
            self.outcome = Some(Outcome::Cancelled);
        }
    }

    fn next(&mut self) {
        if self.current < self.steps.len() - 1 {
            self.current += 1;
            info!("Change facility: step {}", self.current);
            self.load_current();
        }
    }

    fn finish(&mut self) {
        if let Some(account) = self.context.new_account.clone() {
            info!("Change facility: account '{}' is ready", account.username);
            self.outcome = Some(Outcome::Completed(account));
        }
    }

    fn on_event(&mut self, event: Event) {
        debug!("Change facility: received {:?}", event);
        match event {
            Event::Back => self.previous(),
            Event::Continue(account) => {
                self.context.new_account = Some(account);
                self.next();
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Previous => {
                self.previous();
                Task::none()
            }
            Message::Finish => {
                self.finish();
                Task::none()
            }
            _ => self.current_step().update(message),
        };
        while let Ok(event) = self.events.try_recv() {
            self.on_event(event);
        }
        task
    }

    /// Progress displayed to the user, starting at 1.
    fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.steps.len())
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.steps
            .get(self.current)
            .expect("There is always a step")
            .view(self.progress())
    }
}
