use crate::model::{EntityTypeId, ForeignKeyId, MemberBinding, PropertyIndexes};
use serde::Serialize;

///
/// NavigationConfig
///

#[derive(Clone, Debug)]
pub struct NavigationConfig {
    pub name: String,
    pub foreign_key: ForeignKeyId,

    /// Navigation declared on the dependent side, pointing at the principal.
    pub on_dependent: bool,

    /// Allow the navigation to exist without a member on the shape.
    pub shadow: bool,
}

impl NavigationConfig {
    /// Reference navigation from the dependent to its principal.
    #[must_use]
    pub fn to_principal(name: impl Into<String>, foreign_key: ForeignKeyId) -> Self {
        Self {
            name: name.into(),
            foreign_key,
            on_dependent: true,
            shadow: false,
        }
    }

    /// Navigation from the principal to its dependent(s).
    #[must_use]
    pub fn to_dependents(name: impl Into<String>, foreign_key: ForeignKeyId) -> Self {
        Self {
            name: name.into(),
            foreign_key,
            on_dependent: false,
            shadow: false,
        }
    }

    #[must_use]
    pub const fn shadow(mut self) -> Self {
        self.shadow = true;
        self
    }
}

///
/// SkipNavigationConfig
///

#[derive(Clone, Debug)]
pub struct SkipNavigationConfig {
    pub name: String,
    pub target_type: EntityTypeId,

    /// Allow the navigation to exist without a member on the shape.
    pub shadow: bool,
}

impl SkipNavigationConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, target_type: EntityTypeId) -> Self {
        Self {
            name: name.into(),
            target_type,
            shadow: false,
        }
    }

    #[must_use]
    pub const fn shadow(mut self) -> Self {
        self.shadow = true;
        self
    }
}

///
/// Navigation
///

#[derive(Clone, Debug, Serialize)]
pub struct Navigation {
    pub name: String,
    pub declaring_type: EntityTypeId,
    pub foreign_key: ForeignKeyId,
    pub on_dependent: bool,
    pub collection: bool,
    pub member: Option<MemberBinding>,

    pub(crate) slots: Option<PropertyIndexes>,
}

impl Navigation {
    #[must_use]
    pub const fn is_shadow(&self) -> bool {
        self.member.is_none()
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.collection
    }

    #[must_use]
    pub const fn property_indexes(&self) -> Option<PropertyIndexes> {
        self.slots
    }
}

///
/// SkipNavigation
/// Many-to-many navigation that skips over the join entity type.
///

#[derive(Clone, Debug, Serialize)]
pub struct SkipNavigation {
    pub name: String,
    pub declaring_type: EntityTypeId,
    pub target_type: EntityTypeId,
    pub collection: bool,
    pub member: Option<MemberBinding>,

    pub(crate) slots: Option<PropertyIndexes>,
}

impl SkipNavigation {
    #[must_use]
    pub const fn is_shadow(&self) -> bool {
        self.member.is_none()
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.collection
    }

    #[must_use]
    pub const fn property_indexes(&self) -> Option<PropertyIndexes> {
        self.slots
    }
}

///
/// ServiceProperty
/// Member resolved from runtime services on materialization; never snapshotted.
///

#[derive(Clone, Debug, Serialize)]
pub struct ServiceProperty {
    pub name: String,
    pub declaring_type: EntityTypeId,
    pub member: Option<MemberBinding>,

    pub(crate) slots: Option<PropertyIndexes>,
}

impl ServiceProperty {
    #[must_use]
    pub const fn property_indexes(&self) -> Option<PropertyIndexes> {
        self.slots
    }
}
