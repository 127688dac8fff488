//! Process-level argument handling and error reporting.

use crate::core::cli::CliArgs;
use clap::error::ErrorKind;
use clap::Parser;

/// Exit status for usage errors and failed runs
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Report a fatal error with its cause chain and exit with code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error generating font:");
    eprintln!("{error:?}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(FAILURE_EXIT_CODE);
}

/// Parse command line arguments.
///
/// Help and version requests exit with status 0; missing or invalid
/// arguments print usage and exit with status 1.
pub fn get_cli_args() -> CliArgs {
    let args = CliArgs::try_parse().unwrap_or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let _ = err.print();
            std::process::exit(FAILURE_EXIT_CODE);
        }
    });

    if let Err(message) = args.validate() {
        eprintln!("{message}");
        std::process::exit(FAILURE_EXIT_CODE);
    }
    args
}
