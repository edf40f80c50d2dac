/// Database test utilities with singleton pattern
///
/// Postgres tests only run when `TEST_DATABASE_URL` is set; callers get `None`
/// otherwise and return early.
use diesel::prelude::*;
use encore::shared::Database;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static DB: OnceLock<Option<Arc<Database>>> = OnceLock::new();

/// Shared, migrated database for the whole test binary
pub fn test_database() -> Option<Arc<Database>> {
    DB.get_or_init(|| {
        dotenvy::dotenv().ok();
        let url = std::env::var("TEST_DATABASE_URL").ok()?;

        let db = Database::connect(&url).expect("Failed to create test database pool");
        db.run_migrations()
            .expect("Failed to run migrations on test database");
        Some(Arc::new(db))
    })
    .clone()
}

/// Clean all test tables - use at the start of each test
pub fn clean_test_db(db: &Database) {
    let mut conn = db.get_connection().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE production_reviews, productions RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean tables");
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
