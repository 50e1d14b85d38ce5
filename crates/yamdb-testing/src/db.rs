use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A private in-memory SQLite database.
///
/// The pool is pinned to a single connection; every new SQLite memory
/// connection would otherwise open an empty database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("connect in-memory sqlite")
}
