pub mod account;
pub mod args;
pub mod change_facility;
pub mod dir;
pub mod facility;
pub mod logger;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
