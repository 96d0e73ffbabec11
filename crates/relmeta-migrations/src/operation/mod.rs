mod rename_index;
mod rename_table;

pub use rename_index::RenameIndexOperation;
pub use rename_table::RenameTableOperation;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

///
/// TableMigrationOperation
///
/// An operation that targets exactly one table.
///

pub trait TableMigrationOperation {
    fn table(&self) -> &str;

    fn schema(&self) -> Option<&str>;
}

///
/// MigrationOperation
///

#[derive(Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum MigrationOperation {
    RenameIndex(RenameIndexOperation),
    RenameTable(RenameTableOperation),
}

impl MigrationOperation {
    /// Type name used in provider diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RenameIndex(_) => "RenameIndexOperation",
            Self::RenameTable(_) => "RenameTableOperation",
        }
    }

    /// The operation dropped or replaced data that cannot be recovered.
    #[must_use]
    pub const fn is_destructive_change(&self) -> bool {
        match self {
            Self::RenameIndex(op) => op.is_destructive_change,
            Self::RenameTable(op) => op.is_destructive_change,
        }
    }

    /// The table this operation touches, when it names one.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::RenameIndex(op) => op.table.as_deref(),
            Self::RenameTable(op) => Some(op.table()),
        }
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        match self {
            Self::RenameIndex(op) => op.schema.as_deref(),
            Self::RenameTable(op) => op.schema(),
        }
    }
}
