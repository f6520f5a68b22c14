use std::process::ExitCode;

use edi2json::cli::{self, parse_args};
use edi2json::driver::Driver;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EDI2JSON_LOG";

fn main() -> ExitCode {
    init_tracing();

    let invocation = match parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            let code = err.exit_code();
            cli::handle_error(err);
            return ExitCode::from(code);
        }
    };

    let mut driver = Driver::new(invocation.paths, invocation.options);
    match driver.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            cli::handle_error(err);
            ExitCode::from(code)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
