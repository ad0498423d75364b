use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use config::AppConfig;

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "clicks_chart=info".parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded config: {:?}", config);

    if services::generate_chart(&config).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
