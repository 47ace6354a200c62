use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use alov2csv::{process_dataset, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.input_dir.is_dir() {
        error!(
            "The specified input_dir does not exist: {}",
            args.input_dir.display()
        );
        return ExitCode::FAILURE;
    }

    info!("Starting the conversion process...");

    match process_dataset(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
