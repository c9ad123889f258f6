#![allow(non_snake_case)]

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use goldenHourCal::cli::Cli;
use goldenHourCal::runtime;
use goldenHourCal::service::event_builder::UuidIdGenerator;
use goldenHourCal::service::weather_service::OpenMeteoService;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime::run_once(&settings, &OpenMeteoService, &UuidIdGenerator, Utc::now()).await {
        Ok(summary) => {
            println!("{}", summary.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Calendar run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
