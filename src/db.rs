use anyhow::Result;
use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};

pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePool::connect(database_url).await?;
    setup_schema(&pool).await?;
    Ok(pool)
}

async fn setup_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_name TEXT NOT NULL,
            check_in      TEXT NOT NULL,
            check_out     TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Serves the latest-open lookup of checkout-by-name
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_employee_open
        ON attendance (employee_name, check_out);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
