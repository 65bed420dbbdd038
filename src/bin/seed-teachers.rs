/// Register teacher accounts so they can manage announcements.
///
/// Usage: seed-teachers --username alice --display-name "Alice Martin" --username bob
///   Display names pair with usernames in order; extra usernames get none.
///   Existing usernames are left untouched.

use clap::Parser;

use announcements_api::db::{self, PgTeacherDirectory};

#[derive(Parser)]
#[command(name = "seed-teachers", about = "Register teachers allowed to manage announcements")]
struct Args {
    /// Teacher username (repeatable)
    #[arg(long = "username", required = true)]
    usernames: Vec<String>,

    /// Display name for the username at the same position (repeatable)
    #[arg(long = "display-name")]
    display_names: Vec<String>,
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
    db::run_migrations(&pool).await?;
    let teachers = PgTeacherDirectory::new(pool);

    for (i, username) in args.usernames.iter().enumerate() {
        let display_name = args.display_names.get(i).map(String::as_str);
        if teachers.register(username, display_name).await? {
            tracing::info!("Registered teacher {}", username);
        } else {
            tracing::info!("Teacher {} already exists, skipped", username);
        }
    }

    let all = teachers.list().await?;
    tracing::info!("{} teacher(s) registered:", all.len());
    for teacher in all {
        tracing::info!(
            "  {} ({})",
            teacher.username,
            teacher.display_name.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
