//! Preventivo command line entry point

use std::{io, process::ExitCode};

use tracing::error;

use preventivo::{app, config::QuoteConfig, logging};

fn main() -> ExitCode {
    let config = match QuoteConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Help and version requests also arrive here.
            _ = err.print();

            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1));
        }
    };

    if let Err(err) = logging::init(&config.log_level, config.log_format) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln"
        )]
        {
            eprintln!("Logging error: {err}");
        }

        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match app::run(&config, stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "quote failed");

            ExitCode::FAILURE
        }
    }
}
