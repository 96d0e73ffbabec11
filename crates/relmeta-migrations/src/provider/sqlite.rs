use crate::operation::MigrationOperation;
use thiserror::Error as ThisError;

///
/// SqliteError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SqliteError {
    #[error(
        "SQLite does not support this migration operation ('{operation}'). For more information, see {url}.",
        url = super::PROVIDER_LIMITATIONS_URL
    )]
    InvalidMigrationOperation { operation: String },

    #[error(
        "Generating idempotent scripts for migration is not currently supported by SQLite. For more information, see {url}.",
        url = super::PROVIDER_LIMITATIONS_URL
    )]
    MigrationScriptGenerationNotSupported,

    #[error(
        "SQLite does not support schemas. For more information, see {url}.",
        url = super::PROVIDER_LIMITATIONS_URL
    )]
    SchemasNotSupported,

    #[error(
        "SQLite does not support sequences. For more information, see {url}.",
        url = super::PROVIDER_LIMITATIONS_URL
    )]
    SequencesNotSupported,
}

/// Reject rename operations SQLite cannot express: anything naming a
/// schema, and index renames without their table.
pub fn check_rename_operation(operation: &MigrationOperation) -> Result<(), SqliteError> {
    match operation {
        MigrationOperation::RenameTable(op) => {
            if op.schema.is_some() || op.new_schema.is_some() {
                return Err(SqliteError::SchemasNotSupported);
            }
        }
        MigrationOperation::RenameIndex(op) => {
            if op.schema.is_some() {
                return Err(SqliteError::SchemasNotSupported);
            }
            if op.table.is_none() {
                return Err(SqliteError::InvalidMigrationOperation {
                    operation: operation.kind().to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Idempotent script generation is never available.
pub const fn check_idempotent_script() -> Result<(), SqliteError> {
    Err(SqliteError::MigrationScriptGenerationNotSupported)
}
