//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match wayfare_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(wayfare_cli::CliError::ArgumentParsing(err)) => {
            // Clap renders help and version through the error path.
            let _ = err.print();
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2))
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("wayfare: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
