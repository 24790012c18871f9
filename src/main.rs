use shelfwise::app::{build_router, default_modules};
use shelfwise::config::{AppConfig, ConfigService};
use shelfwise::database::DATABASE;
use shelfwise::lifecycle::Application;
use shelfwise::logging::init_tracing;
use shelfwise::module::build_registry;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_service(&ConfigService::from_dotenv())?;
    init_tracing(&config.log_level);

    tracing::info!("Starting shelfwise...");

    let registry = build_registry(default_modules(&config)).await?;
    let database = registry.resolve(&DATABASE)?;

    let app = Application::builder()
        .registry(registry.clone())
        .router(build_router(&registry)?)
        .register_lifecycle(database, "database")
        .init_timeout(Duration::from_secs(30))
        .build()
        .await?;

    let listener = TcpListener::bind(config.http.address()).await?;
    app.serve(listener).await?;

    Ok(())
}
