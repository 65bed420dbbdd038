use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use announcements_api::{
    config::{Config, StoreBackend},
    db::{self, MemoryStore, PgAnnouncementStore, PgTeacherDirectory},
    services::announcements::AnnouncementService,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let announcements = match config.store {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let pool = db::create_pool(url, config.database_max_connections).await?;
            db::run_migrations(&pool).await?;
            info!("Database connected and migrations applied");

            AnnouncementService::new(
                Arc::new(PgAnnouncementStore::new(pool.clone())),
                Arc::new(PgTeacherDirectory::new(pool)),
            )
        }
        StoreBackend::Memory => {
            warn!(
                "Using in-memory store with {} teacher(s); data is lost on restart",
                config.seed_teachers.len()
            );
            let store = Arc::new(MemoryStore::with_teachers(config.seed_teachers.clone()));
            AnnouncementService::new(store.clone(), store)
        }
    };

    let state = AppState {
        announcements,
        config: config.clone(),
    };
    let app = announcements_api::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
