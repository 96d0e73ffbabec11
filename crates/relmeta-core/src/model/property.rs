use crate::model::{
    EntityTypeId, ForeignKeyId, IndexId, KeyId, MemberBinding, PropertyIndexes,
};
use serde::{Deserialize, Serialize};

///
/// ValueGenerated
///
/// When, if ever, a value for the property is generated on save.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValueGenerated {
    #[default]
    Never,
    OnAdd,
    OnAddOrUpdate,
    OnUpdate,
}

///
/// PropertyConfig
///
/// Builder input for a scalar property. Whether the property is shadow
/// state is decided by the shape binding table, not by this config.
///

#[derive(Clone, Debug, Default)]
pub struct PropertyConfig {
    pub name: String,
    pub value_generated: ValueGenerated,
    pub client_generated: bool,
    pub concurrency_token: bool,
    pub nullable: bool,
}

impl PropertyConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn value_generated(mut self, value_generated: ValueGenerated) -> Self {
        self.value_generated = value_generated;
        self
    }

    /// Values are produced by a client-side generator even when flagged
    /// as generated.
    #[must_use]
    pub const fn client_generated(mut self) -> Self {
        self.client_generated = true;
        self
    }

    #[must_use]
    pub const fn concurrency_token(mut self) -> Self {
        self.concurrency_token = true;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

///
/// Property
///

#[derive(Clone, Debug, Serialize)]
pub struct Property {
    pub name: String,
    pub declaring_type: EntityTypeId,
    pub member: Option<MemberBinding>,
    pub value_generated: ValueGenerated,
    pub client_generated: bool,
    pub concurrency_token: bool,
    pub nullable: bool,

    // back-references maintained by the builder
    pub(crate) keys: Vec<KeyId>,
    pub(crate) foreign_keys: Vec<ForeignKeyId>,
    pub(crate) indexes: Vec<IndexId>,

    pub(crate) slots: Option<PropertyIndexes>,
}

impl Property {
    pub(crate) fn new(
        config: PropertyConfig,
        declaring_type: EntityTypeId,
        member: Option<MemberBinding>,
    ) -> Self {
        Self {
            name: config.name,
            declaring_type,
            member,
            value_generated: config.value_generated,
            client_generated: config.client_generated,
            concurrency_token: config.concurrency_token,
            nullable: config.nullable,
            keys: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            slots: None,
        }
    }

    /// No member on the mapped shape backs this property.
    #[must_use]
    pub const fn is_shadow(&self) -> bool {
        self.member.is_none()
    }

    #[must_use]
    pub const fn is_key(&self) -> bool {
        !self.keys.is_empty()
    }

    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    #[must_use]
    pub fn containing_keys(&self) -> &[KeyId] {
        &self.keys
    }

    #[must_use]
    pub fn containing_foreign_keys(&self) -> &[ForeignKeyId] {
        &self.foreign_keys
    }

    #[must_use]
    pub fn containing_indexes(&self) -> &[IndexId] {
        &self.indexes
    }

    /// Slot assignment; `None` until the model is finalized.
    #[must_use]
    pub const fn property_indexes(&self) -> Option<PropertyIndexes> {
        self.slots
    }
}
