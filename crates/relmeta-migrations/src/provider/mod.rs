//! Provider-specific diagnostics raised while checking migration operations
//! and store type mappings.

pub mod sql_server;
pub mod sqlite;

pub use sql_server::SqlServerError;
pub use sqlite::SqliteError;

/// Where provider limitations are documented.
pub const PROVIDER_LIMITATIONS_URL: &str = "http://go.microsoft.com/fwlink/?LinkId=723262";
