mod config;
mod context;
mod utils;

use config::Limits;
use std::process::ExitCode;
use utils::window::DesktopWindows;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the JSON record.
    if let Err(e) = config::init_logger() {
        eprintln!("{e:#}");
    }
    let limits = Limits::default();

    let stdout = std::io::stdout();
    match context::run(&DesktopWindows, &limits, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
