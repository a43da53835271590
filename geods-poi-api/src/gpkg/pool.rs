use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::PoiApiError;

/// opens a read-only connection pool on the GeoPackage at `path` and checks
/// that it answers queries.
pub async fn open_pool(path: &Path, max_connections: u32) -> Result<SqlitePool, PoiApiError> {
    if !path.is_file() {
        return Err(PoiApiError::ReadError {
            path: path.to_path_buf(),
            message: String::from("database file does not exist"),
        });
    }
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| PoiApiError::ReadError {
            path: path.to_path_buf(),
            message: format!("failed to connect to database: {e}"),
        })?;
    ping(&pool).await?;
    log::info!("connected to database: {}", path.display());
    Ok(pool)
}

/// runs a trivial query against the pool
pub async fn ping(pool: &SqlitePool) -> Result<(), PoiApiError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
