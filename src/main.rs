use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use budgetbuddy::config::Config;
use budgetbuddy::session::MemorySessionStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Configuration must resolve before anything else; a missing
    // BUDGET_DATABASE_URL is a startup failure, not a silent fallback.
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            eprintln!("required: BUDGET_DATABASE_URL (e.g. sqlite:budgetbuddy.sqlite)");
            std::process::exit(2);
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        admin_identifier = %cfg.admin_identifier,
        "starting budgetbuddy"
    );

    let storage = budgetbuddy::db::connect(&cfg.database_url).await?;
    let sessions = Arc::new(MemorySessionStore::default());

    let state = budgetbuddy::router::AppState::new(storage, sessions, &cfg);
    let app = budgetbuddy::router::budget_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
