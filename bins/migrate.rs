use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};

/// Apply pending migrations, then read the banner table through the services.
#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();

    let cfg = match configs::AppConfig::load_and_validate().or_else(|_| configs::AppConfig::from_env()) {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "migrate", event = "config_invalid", error = %e, "cannot load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.json, cfg.logging.level.as_deref());
    info!(service = "migrate", event = "start", version = env!("CARGO_PKG_VERSION"), "migration run starting");

    match run(&cfg).await {
        Ok(()) => {
            info!(service = "migrate", event = "done", "migrations applied");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "migrate", event = "failed", error = %e, "migration run failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cfg: &configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let services = service::container::ServiceContainer::from_db(db, &cfg.cache);
    let banners = services.banners.get_all_banners().await?;
    info!(banners = banners.len(), "schema reachable");
    Ok(())
}
