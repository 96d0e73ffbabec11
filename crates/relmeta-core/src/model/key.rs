use crate::model::{EntityTypeId, KeyId, PropertyId};
use serde::Serialize;
use std::ops::Not;

///
/// Key
///

#[derive(Clone, Debug, Serialize)]
pub struct Key {
    pub declaring_type: EntityTypeId,
    pub properties: Vec<PropertyId>,
}

///
/// ForeignKeyOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ForeignKeyOptions {
    /// The dependent exists only within the lifetime of its principal.
    pub ownership: bool,

    /// At most one dependent per principal.
    pub unique: bool,

    pub required: bool,
}

impl ForeignKeyOptions {
    #[must_use]
    pub const fn ownership() -> Self {
        Self {
            ownership: true,
            unique: false,
            required: true,
        }
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

///
/// ForeignKey
///

#[derive(Clone, Debug, Serialize)]
pub struct ForeignKey {
    pub dependent_type: EntityTypeId,
    pub properties: Vec<PropertyId>,
    pub principal_type: EntityTypeId,
    pub principal_key: KeyId,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub ownership: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub unique: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub required: bool,
}

impl ForeignKey {
    #[must_use]
    pub const fn is_ownership(&self) -> bool {
        self.ownership
    }
}

///
/// Index
///

#[derive(Clone, Debug, Serialize)]
pub struct Index {
    pub declaring_type: EntityTypeId,
    pub properties: Vec<PropertyId>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub unique: bool,
}

impl Index {
    /// Whether this index's property prefix matches the start of another index.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.properties.len() < other.properties.len()
            && other.properties.starts_with(&self.properties)
    }
}
