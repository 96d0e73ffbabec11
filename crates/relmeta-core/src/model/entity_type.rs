use crate::model::{
    ChangeTrackingStrategy, EntityTypeId, ForeignKeyId, IndexId, KeyId, NavigationId,
    PropertyCounts, PropertyId, ServicePropertyId, ShapeId, SkipNavigationId,
};
use serde::Serialize;
use std::ops::Not;

///
/// EntityType
///
/// One mapped shape in the model. Member lists hold only members declared
/// on this type, in declaration order; inherited members live on the base.
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityType {
    pub name: String,
    pub shape: ShapeId,
    pub base_type: Option<EntityTypeId>,
    pub change_tracking_strategy: ChangeTrackingStrategy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,

    /// The shape may be mapped by more than one entity type.
    #[serde(default, skip_serializing_if = "Not::not")]
    pub shared_clr_type: bool,

    pub(crate) properties: Vec<PropertyId>,
    pub(crate) navigations: Vec<NavigationId>,
    pub(crate) skip_navigations: Vec<SkipNavigationId>,
    pub(crate) service_properties: Vec<ServicePropertyId>,
    pub(crate) keys: Vec<KeyId>,
    pub(crate) primary_key: Option<KeyId>,
    pub(crate) foreign_keys: Vec<ForeignKeyId>,
    pub(crate) indexes: Vec<IndexId>,

    pub(crate) counts: Option<PropertyCounts>,
}

impl EntityType {
    pub(crate) const fn new(
        name: String,
        shape: ShapeId,
        base_type: Option<EntityTypeId>,
        shared_clr_type: bool,
    ) -> Self {
        Self {
            name,
            shape,
            base_type,
            change_tracking_strategy: ChangeTrackingStrategy::Snapshot,
            discriminator_value: None,
            shared_clr_type,
            properties: Vec::new(),
            navigations: Vec::new(),
            skip_navigations: Vec::new(),
            service_properties: Vec::new(),
            keys: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            counts: None,
        }
    }

    #[must_use]
    pub fn declared_properties(&self) -> &[PropertyId] {
        &self.properties
    }

    #[must_use]
    pub fn declared_navigations(&self) -> &[NavigationId] {
        &self.navigations
    }

    #[must_use]
    pub fn declared_skip_navigations(&self) -> &[SkipNavigationId] {
        &self.skip_navigations
    }

    #[must_use]
    pub fn declared_service_properties(&self) -> &[ServicePropertyId] {
        &self.service_properties
    }

    #[must_use]
    pub fn declared_keys(&self) -> &[KeyId] {
        &self.keys
    }

    #[must_use]
    pub fn declared_foreign_keys(&self) -> &[ForeignKeyId] {
        &self.foreign_keys
    }

    #[must_use]
    pub fn declared_indexes(&self) -> &[IndexId] {
        &self.indexes
    }

    /// Primary key declared on this type; derived types inherit the root's.
    #[must_use]
    pub const fn declared_primary_key(&self) -> Option<KeyId> {
        self.primary_key
    }

    /// Slot totals; `None` until the model is finalized.
    #[must_use]
    pub const fn counts(&self) -> Option<PropertyCounts> {
        self.counts
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.base_type.is_none()
    }
}
