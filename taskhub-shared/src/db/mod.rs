/// Database access layer
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: migration runner (sqlx migrate, `migrations/` directory)

pub mod migrations;
pub mod pool;
