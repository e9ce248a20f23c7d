#![cfg(test)]
use sea_orm::{Database, DatabaseConnection};
use migration::MigratorTrait;
use tempfile::TempDir;

/// Fresh in-memory database with every migration applied.
///
/// Each call yields an isolated database, so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Migrated SQLite database in a temporary file.
///
/// Unlike `sqlite::memory:` every pooled connection sees the same data, so
/// tests can run statements concurrently. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn get_file_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = TempDir::new()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("forum.db").display());
    let db = Database::connect(url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((dir, db))
}
