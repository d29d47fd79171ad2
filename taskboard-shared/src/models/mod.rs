/// Data models for Taskboard
///
/// Plain row types shared by every storage backend. The SQL that reads and
/// writes them lives in [`crate::store`].
///
/// # Models
///
/// - `user`: User accounts and their password hashes
/// - `task`: Per-user tasks with a completion flag

pub mod task;
pub mod user;
