mod db;
mod errors;

pub mod orders;
pub mod snapshots;
pub mod vendors;

pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
