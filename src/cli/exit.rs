use crate::cli::main::BootstrapError;

pub const APP_FAILURE: u8 = 1;

/// Log what went wrong and pick the process exit status.
pub fn report(result: Result<(), BootstrapError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(BootstrapError::Args(e)) => {
            if let Err(print_err) = e.print() {
                eprintln!("{print_err}");
            }
            u8::try_from(e.exit_code()).unwrap_or(APP_FAILURE)
        }
        Err(BootstrapError::App(e)) => {
            tracing::error!("{e:#}");
            APP_FAILURE
        }
    }
}
