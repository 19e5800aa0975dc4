pub mod repositories;

/// Connects to `TEST_DATABASE_URL` when it is set, returning `None` otherwise
/// so database tests can be skipped on machines without PostgreSQL.
pub async fn create_test_pool() -> Option<crate::DbPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Initialize test schema
    crate::schema::initialize_database(&pool)
        .await
        .expect("Failed to initialize test database schema");

    Some(pool)
}
