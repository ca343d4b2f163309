#![windows_subsystem = "windows"]

use std::error::Error;

use iced::{Settings, Size, Task};
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;

use facility_gui::{
    args::{args_to_config, parse_args},
    change_facility::{ChangeFacility, Message, Outcome},
    facility::TargetFacility,
    logger::{parse_log_level, setup_logger},
    VERSION,
};
use facility_ui::{component::text, widget::Element};

struct App {
    flow: ChangeFacility,
}

impl App {
    fn new(target_facility: Option<TargetFacility>) -> (Self, Task<Message>) {
        (
            Self {
                flow: ChangeFacility::new(target_facility),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        "Change facility".to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.flow.update(message);
        match self.flow.outcome() {
            None => task,
            Some(Outcome::Cancelled) => {
                info!("Account creation cancelled");
                iced::exit()
            }
            Some(Outcome::Completed(account)) => {
                info!("Account '{}' handed over for creation", account.username);
                iced::exit()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.flow.view()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().collect(), VERSION)?;
    let config = args_to_config(&args)?;
    let log_level = parse_log_level()?.unwrap_or(LevelFilter::INFO);

    config.datadir.init()?;
    setup_logger(log_level, &config.datadir)?;

    let target_facility = match &config.facility {
        Some(path) => match TargetFacility::from_file(path) {
            Ok(facility) => Some(facility),
            Err(e) => {
                error!("{}", e);
                return Err(e.into());
            }
        },
        None => {
            warn!("No target facility given, a password will be required");
            None
        }
    };

    let settings = Settings {
        id: Some("change-facility".to_string()),
        default_text_size: text::P1_SIZE.into(),
        ..Default::default()
    };

    let window_settings = iced::window::Settings {
        size: Size {
            width: 1000.0,
            height: 800.0,
        },
        ..Default::default()
    };

    if let Err(e) = iced::application(App::title, App::update, App::view)
        .settings(settings)
        .window(window_settings)
        .run_with(move || App::new(target_facility))
    {
        error!("{}", e);
        Err(format!("Failed to launch UI: {}", e).into())
    } else {
        Ok(())
    }
}
