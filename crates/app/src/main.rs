use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "holocron={level},server={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;

    let engine = engine::Engine::builder()
        .database(db)
        .token_secret(settings.auth.secret)
        .token_ttl(chrono::Duration::seconds(settings.auth.token_ttl_secs))
        .build()
        .await?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
