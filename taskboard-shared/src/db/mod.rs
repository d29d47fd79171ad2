/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL and MySQL connection pools with health checks
/// - `migrations`: Embedded schema migrations per backend
///
/// Queries themselves live in the [`crate::store`] backends.

pub mod migrations;
pub mod pool;
