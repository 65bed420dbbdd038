/// Remove announcements that expired a while ago.
/// Run daily (e.g., via cron job: 0 3 * * * /app/purge-expired)
///
/// Usage: purge-expired [--older-than-days N]
///   --older-than-days N : keep announcements expired less than N days ago (default 30)

use chrono::{Duration, Utc};
use clap::Parser;

use announcements_api::db::{self, PgAnnouncementStore};

#[derive(Parser)]
#[command(name = "purge-expired", about = "Delete long-expired announcements")]
struct Args {
    /// Grace period in days after expiration before an announcement is deleted
    #[arg(long, default_value_t = 30)]
    older_than_days: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

    let pool = db::create_pool(&database_url, 2).await?;
    let store = PgAnnouncementStore::new(pool);

    let cutoff = Utc::now() - Duration::days(i64::from(args.older_than_days));
    tracing::info!("Purging announcements expired before {}", cutoff.to_rfc3339());

    let removed = store.purge_expired_before(cutoff).await?;
    tracing::info!("Purge completed: {} announcement(s) removed", removed);

    Ok(())
}
