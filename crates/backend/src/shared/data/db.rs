use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS a001_request (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        message TEXT,
        status TEXT NOT NULL DEFAULT 'new',
        user_id INTEGER,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a001_request_status ON a001_request (status);",
    "CREATE INDEX IF NOT EXISTS idx_a001_request_user_id ON a001_request (user_id);",
];

/// sqlite URL for a file path; Windows drive paths get a leading slash
pub fn sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Открыть файл БД, создать схему и сохранить соединение глобально
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", db_url);
    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection is already initialized"))?;
    Ok(())
}

/// Создать таблицы и индексы, если их нет
pub async fn ensure_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

/// `SELECT 1` для проверки соединения
pub async fn ping<C: ConnectionTrait>(conn: &C) -> anyhow::Result<i64> {
    let row = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT 1 AS test_result".to_string(),
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("SELECT 1 returned no rows"))?;
    Ok(row.try_get::<i64>("", "test_result")?)
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

/// In-memory база со схемой, для тестов
#[cfg(test)]
pub async fn memory_database() -> DatabaseConnection {
    // у каждого соединения пула своя in-memory база
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.unwrap();
    ensure_schema(&conn).await.unwrap();
    conn
}

/// Глобальное соединение на in-memory базе, для тестов HTTP-слоя
#[cfg(test)]
pub async fn install_memory_database() -> &'static DatabaseConnection {
    if DB_CONN.get().is_none() {
        let conn = memory_database().await;
        let _ = DB_CONN.set(conn);
    }
    DB_CONN.get().unwrap()
}
