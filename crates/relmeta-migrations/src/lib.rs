//! Migration operation records and provider diagnostics.
//!
//! Operations are plain data consumed by an external SQL generation
//! pipeline; this crate stores and renders them but generates no SQL.

pub mod operation;
pub mod provider;

pub use operation::{
    MigrationOperation, RenameIndexOperation, RenameTableOperation, TableMigrationOperation,
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::operation::{
        MigrationOperation, RenameIndexOperation, RenameTableOperation, TableMigrationOperation,
    };
}
