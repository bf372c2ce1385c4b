pub mod asset;
pub mod config;
pub mod display;
pub mod input;
pub mod two;

pub use glam as math;
pub use palette as color;
pub use pennant::*;

use std::{fs::OpenOptions, path::PathBuf};

fn error_log_path() -> PathBuf {
    let mut path = asset::base_path();
    path.push("error.log");
    path
}

fn append_error_log(message: String) {
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log_path())
    {
        let _ = writeln!(file, "{}\n", message);
    }
}

/// Records a problem the game can carry on from.
#[track_caller]
pub fn nonfatal_error(message: &str) {
    let location = std::panic::Location::caller();
    log::error!("{} (at {})", message, location);
    append_error_log(format!("nonfatal at {}:\n{}", location, message));
    eprintln!(
        "{}",
        console::style("A nonfatal error occurred. See error.log for details.").red()
    );
}

pub trait ResultExt<T> {
    fn unwrap_nonfatal(self) -> T;
}

impl<T: Default, E: std::error::Error> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn unwrap_nonfatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                nonfatal_error(&error.to_string());
                Default::default()
            }
        }
    }
}
