use serde::{Deserialize, Serialize};
use std::{fmt, ops::Not};

///
/// RenameIndexOperation
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenameIndexOperation {
    pub name: String,
    pub new_name: String,

    /// Schema of the table holding the index; `None` means the default schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_destructive_change: bool,
}

impl RenameIndexOperation {
    #[must_use]
    pub fn new(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: new_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl fmt::Display for RenameIndexOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER INDEX {} RENAME TO {}", self.name, self.new_name)
    }
}
