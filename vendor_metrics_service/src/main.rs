use dotenvy::dotenv;
use log::info;
use vendor_metrics_service::{cli::handle_command_line_args, config::ServiceConfig, service::run_service};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = ServiceConfig::from_env_or_default();

    info!("🚀️ Starting vendor metrics service with database {}", config.database_url);
    match run_service(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
