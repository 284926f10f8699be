use std::time::Duration;

use migration::Migrator;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

/// An in-memory database lives exactly as long as its one connection.
const IN_MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 86_400);

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let in_memory = is_in_memory(database_url);
    let db = Database::connect(connect_options(database_url)).await?;

    if !in_memory {
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    // Every pooled connection to `:memory:` opens its own empty database, so the
    // pool holds one connection and never retires it.
    if is_in_memory(database_url) {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(IN_MEMORY_CONNECTION_LIFETIME);
    }
    options
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
pub async fn test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:").await.expect("in-memory database")
}
