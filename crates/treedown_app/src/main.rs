mod cli;
mod logging;
mod run;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use run::ExitStatus;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(&cli.log_options());

    let status = match run::execute(&cli) {
        Ok(summary) => {
            run::print_summary(&summary);
            ExitStatus::for_report(&summary.report)
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitStatus::for_error(&err)
        }
    };
    status.into()
}
