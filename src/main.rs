use snippetbox::server::{
    config::Config,
    error::Error,
    model::app::{AppState, Settings, PASSWORD_HASH_COST},
    router, startup,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,snippetbox=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let sessions = startup::connect_to_session(&config).await?;
    let settings = Settings::new(PASSWORD_HASH_COST)?;

    tracing::info!("Starting server");

    let router = router::routes(AppState::new(db, settings), sessions);

    startup::serve(&config, router).await
}
