//! Entry point for the `starhaul` command-line interface.
#![forbid(unsafe_code)]

use env_logger::Env;
use starhaul_cli::CliError;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    match starhaul_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report_failure(&err);
            std::process::exit(1);
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported to the terminal before exiting"
)]
fn report_failure(err: &CliError) {
    eprintln!("starhaul: {err}");
}
