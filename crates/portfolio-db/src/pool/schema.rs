//! Schema bootstrap

use sqlx::postgres::PgPool;
use tracing::info;

const INIT_SQL: &str = include_str!("../../migrations/0001_init.sql");

/// Advisory lock key serializing concurrent bootstraps
const SCHEMA_LOCK_KEY: i64 = 0x706f_7274_666f_6c69;

/// Apply the schema. Safe to run on every startup and from several
/// processes at once.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    let applied = sqlx::raw_sql(INIT_SQL).execute(&mut *conn).await;

    sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    applied?;
    info!("Database schema is up to date");
    Ok(())
}
