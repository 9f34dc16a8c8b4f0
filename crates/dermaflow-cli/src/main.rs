use dermaflow_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File logging when the state dir is writable, stderr otherwise.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("dermaflow error: {:#}", err);
        std::process::exit(1);
    }
}
