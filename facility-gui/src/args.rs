//! Command-line argument parsing.

use std::{error::Error, fmt::Display, path::PathBuf, process};

use crate::dir::DataDirectory;

/// Parsed command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    DatadirPath(DataDirectory),
    FacilityPath(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub datadir: DataDirectory,
    /// File of the target facility, if unknown a password is required.
    pub facility: Option<PathBuf>,
}

/// Parse command-line arguments.
///
/// # Arguments
/// - `args`: Command-line arguments (including program name at args[0])
/// - `version`: Version to display for --version flag
pub fn parse_args(args: Vec<String>, version: impl Display) -> Result<Vec<Arg>, Box<dyn Error>> {
    let mut res = Vec::new();

    let app_name = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("change-facility");

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        eprintln!("{}", version);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!(
            r#"
Usage: {app_name} [OPTIONS]

Options:
    --datadir <PATH>    Path of the directory of the log file
    --facility <PATH>   Path of the JSON description of the target facility
    -v, --version       Display {app_name} version
    -h, --help          Print help

Environment:
    LOG_LEVEL           error, warn, info, debug or trace
        "#
        );
        process::exit(0);
    }

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--datadir" => match iter.next() {
                Some(a) => res.push(Arg::DatadirPath(DataDirectory::new(PathBuf::from(a)))),
                None => return Err("missing arg to --datadir".into()),
            },
            "--facility" => match iter.next() {
                Some(a) => res.push(Arg::FacilityPath(PathBuf::from(a))),
                None => return Err("missing arg to --facility".into()),
            },
            a => return Err(format!("unknown argument {}", a).into()),
        }
    }

    Ok(res)
}

/// Convert parsed command-line arguments to a Config.
pub fn args_to_config(args: &[Arg]) -> Result<Config, Box<dyn Error>> {
    let mut datadir = None;
    let mut facility = None;
    for arg in args {
        match arg {
            Arg::DatadirPath(d) if datadir.is_none() => datadir = Some(d.clone()),
            Arg::FacilityPath(f) if facility.is_none() => facility = Some(f.clone()),
            _ => return Err("Unknown args combination".into()),
        }
    }
    Ok(Config {
        datadir: match datadir {
            Some(d) => d,
            None => DataDirectory::new_default()?,
        },
        facility,
    })
}
