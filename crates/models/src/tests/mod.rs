
/// Bidirectional association traversal and cascade tests
pub mod association_tests;

/// Concurrent insert uniqueness tests
pub mod concurrency_tests;

use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

use crate::db;

/// Setup test database with migrations; `None` when no database is reachable.
pub async fn setup_test_db() -> Option<DatabaseConnection> {
    common::utils::logging::init_logging_default();

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
