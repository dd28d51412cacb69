use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

const MIGRATIONS: &[(&str, &str)] = &[("001_bookmarks.sql", include_str!("migrations/001_bookmarks.sql"))];

pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    pub async fn migrate(&self) -> Result<()> {
        for (filename, sql) in SYSTEM_MIGRATIONS.iter().chain(MIGRATIONS) {
            Self::run_migration(&self.conn, filename, sql).await?;
        }
        Ok(())
    }

    async fn open(db: LibsqlDatabase) -> Result<Self> {
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        let database = Database { _db: db, conn };
        database.migrate().await?;
        Ok(database)
    }

    /// Opens the configured database. A remote libsql endpoint is used when
    /// both its url and auth token are set, otherwise a local file under
    /// `data_dir`.
    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let db = match cfg.database.remote() {
            Some((url, token)) => {
                tracing::info!("[db] running against remote database {}", url);
                Builder::new_remote(url.to_string(), token.to_string()).build().await?
            }
            None => {
                let path = data_dir.join(cfg.database.get_path());
                tracing::info!("[db] running against local database {:?}", path);
                Builder::new_local(&path).build().await?
            }
        };

        Self::open(db).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::open(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_migrations(db: &Database) -> i64 {
        let mut rows = db
            .connection()
            .query("SELECT COUNT(*) FROM _migrations", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        row.get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn applies_every_migration_once() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(count_migrations(&db).await, 2);

        db.migrate().await.unwrap();
        assert_eq!(count_migrations(&db).await, 2);
    }

    #[tokio::test]
    async fn creates_bookmarks_table() {
        let db = Database::open_in_memory().await.unwrap();
        let mut rows = db
            .connection()
            .query("SELECT COUNT(*) FROM bookmarks", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn rating_is_bounded_at_rest() {
        let db = Database::open_in_memory().await.unwrap();
        let result = db
            .connection()
            .execute(
                "INSERT INTO bookmarks (title, url, description, rating) VALUES ('t', 'u', 'd', 11)",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
