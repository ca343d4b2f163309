use crate::dir::DataDirectory;
use std::{fs::File, str::FromStr, sync::Arc};
use tracing_subscriber::{
    filter::{self, LevelFilter},
    fmt::writer::BoxMakeWriter,
    prelude::*,
};

const LOG_FILE_NAME: &str = "change-facility.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid LOG_LEVEL: {0}")]
    Level(String),
    #[error("failed to install logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

pub fn setup_logger(log_level: LevelFilter, datadir: &DataDirectory) -> Result<(), LoggerError> {
    let log_path = datadir.path().join(LOG_FILE_NAME);

    let file = File::create(log_path)?;
    let writer = BoxMakeWriter::new(Arc::new(file));

    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(false);

    let stdout_log = tracing_subscriber::fmt::layer().pretty().with_file(false);

    tracing_subscriber::registry()
        .with(
            stdout_log
                .and_then(file_log)
                .with_filter(log_level)
                // Rejects the events of the rendering stack on both layers.
                .with_filter(filter::filter_fn(|metadata| {
                    !metadata.target().starts_with("iced_wgpu")
                        && !metadata.target().starts_with("iced_winit")
                        && !metadata.target().starts_with("iced_graphics")
                        && !metadata.target().starts_with("iced_runtime")
                        && !metadata.target().starts_with("wgpu_core")
                        && !metadata.target().starts_with("wgpu_hal")
                        && !metadata.target().starts_with("naga")
                        && !metadata.target().starts_with("winit")
                        && !metadata.target().starts_with("cosmic_text")
                        && !metadata.target().starts_with("calloop")
                        && !metadata.target().starts_with("polling")
                        && !metadata.target().starts_with("mio")
                })),
        )
        .try_init()?;

    Ok(())
}

/// Parse LOG_LEVEL environment variable.
pub fn parse_log_level() -> Result<Option<LevelFilter>, LoggerError> {
    if let Ok(l) = std::env::var("LOG_LEVEL") {
        LevelFilter::from_str(&l)
            .map(Some)
            .map_err(|e| LoggerError::Level(e.to_string()))
    } else {
        Ok(None)
    }
}
