//! Database Infrastructure Layer
//!
//! PostgreSQL persistence for the invoice ledger: connection pool
//! management, the database error taxonomy, the [`PostgresInvoiceStore`]
//! adapter implementing the domain's `InvoiceStore` port, and the embedded
//! schema migrations.

pub mod error;
pub mod pool;
pub mod store;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use store::PostgresInvoiceStore;

/// Embedded schema migrations, applied at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Applies all pending migrations to the given pool
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if any migration cannot be
/// applied.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), DatabaseError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
}
