use storefront_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // RUST_LOG wins; otherwise Info, or Debug in debug mode, with sqlx kept quiet
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .filter_level(level)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_env(Env::default())
        .init();

    log::info!(
        "Configuration loaded: port={} debug={}",
        config.port,
        config.debug
    );

    storefront_api::run_server(config).await
}
