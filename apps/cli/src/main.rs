mod cli;
mod commands;
mod config;
mod main_lib;
mod prompt;
mod render;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    init_tracing(cli.verbose, &config.log_format);
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }

    let result = match build_state(&config) {
        Ok(state) => commands::run(cli, state).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
