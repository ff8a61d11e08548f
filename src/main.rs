use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

mod cli;
mod logging;

use labmark::kernel::services::adapters::load_config;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let mut config = load_config();
    if let Some(dir) = cli.data_dir.clone() {
        config = config.with_data_dir(dir);
    }
    let _logging = logging::init(&config.log_filter, cli.verbose);

    match cli::run(cli.command, &config) {
        Ok(out) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(out.as_bytes()) {
                tracing::error!(error = %e, "stdout write failed");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("labmark: {e}");
            ExitCode::FAILURE
        }
    }
}
