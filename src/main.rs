//! Binary entrypoint for the `compdb-link` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; real environment variables take precedence.
    let _ = dotenvy::dotenv();
    compdb_link::logging::init();

    // Recording is handled in commands::dispatch via COMPDB_LINK_RECORD=<dir>.
    match compdb_link::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
