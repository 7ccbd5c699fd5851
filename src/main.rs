use dotenv::dotenv;
use esmeralda_api::{api::server, telemetry, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.telemetry);

    server::run_server(config).await
}
