use crate::operation::TableMigrationOperation;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Not};

///
/// RenameTableOperation
///
/// Renames a table, moves it to another schema, or both.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenameTableOperation {
    /// `None` means the default schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_schema: Option<String>,

    /// `None` when only the schema changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_destructive_change: bool,
}

impl RenameTableOperation {
    #[must_use]
    pub fn new(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: Some(new_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_new_schema(mut self, new_schema: impl Into<String>) -> Self {
        self.new_schema = Some(new_schema.into());
        self
    }

    /// Name the table will have afterwards.
    #[must_use]
    pub fn target_name(&self) -> &str {
        self.new_name.as_deref().unwrap_or(&self.name)
    }
}

impl TableMigrationOperation for RenameTableOperation {
    fn table(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }
}

impl fmt::Display for RenameTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} RENAME TO {}", self.name, self.target_name())
    }
}
