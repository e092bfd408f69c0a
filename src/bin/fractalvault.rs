use std::process::ExitCode;

use fractalvault::{
    app::FractalVault,
    cli::{exit::report, main::bootstrap},
    logging::init_logger,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let res = bootstrap(std::env::args_os(), |verbose| {
        init_logger(verbose);
        FractalVault::new(verbose)
    })
    .await;
    ExitCode::from(report(res))
}
