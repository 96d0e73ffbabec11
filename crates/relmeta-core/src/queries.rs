//! Derived, side-effect-free lookups over the metadata model.
//!
//! These run against either stage of the model. Count accessors require a
//! finalized model and report an invariant violation otherwise.

use crate::{
    error::ModelError,
    model::{
        EntityTypeId, ForeignKeyId, KeyId, MemberBinding, MemberRef, ModelData, NavigationId,
        PropertyCounts, PropertyId, PropertyIndexes, ShapeId, shape,
    },
};

impl ModelData {
    //
    // entity type lookup
    //

    /// The single entity type mapping `shape` without sharing it.
    #[must_use]
    pub fn find_entity_type_by_shape(&self, shape: ShapeId) -> Option<EntityTypeId> {
        self.entity_types()
            .find(|(_, et)| et.shape == shape && !et.shared_clr_type)
            .map(|(id, _)| id)
    }

    /// Every entity type mapping `shape`, shared or not.
    #[must_use]
    pub fn entity_types_by_shape(&self, shape: ShapeId) -> Vec<EntityTypeId> {
        self.entity_types()
            .filter(|(_, et)| et.shape == shape)
            .map(|(id, _)| id)
            .collect()
    }

    /// Entity types answering to `name`: the type with that name, plus
    /// shared-shape types whose shape carries that name.
    pub fn entity_types_by_name(&self, name: &str) -> Result<Vec<EntityTypeId>, ModelError> {
        let mut found = Vec::new();
        for (id, et) in self.entity_types() {
            if et.name == name || (et.shared_clr_type && self.shape(et.shape)?.name == name) {
                found.push(id);
            }
        }

        Ok(found)
    }

    /// Whether `shape` is mapped by more than one entity type or flagged shared.
    #[must_use]
    pub fn is_shared(&self, shape: ShapeId) -> bool {
        let mut mapped = self.entity_types().filter(|(_, et)| et.shape == shape);

        match (mapped.next(), mapped.next()) {
            (Some((_, et)), None) => et.shared_clr_type,
            (Some(_), Some(_)) => true,
            (None, _) => false,
        }
    }

    #[must_use]
    pub fn has_entity_type_with_defining_navigation(&self, shape: ShapeId) -> bool {
        self.is_shared(shape)
    }

    #[must_use]
    pub fn has_entity_type_with_defining_navigation_named(&self, name: &str) -> bool {
        self.find_entity_type(name)
            .and_then(|id| self.entity_type(id).ok())
            .is_some_and(|et| et.shared_clr_type)
    }

    //
    // naming
    //

    pub fn display_name(&self, id: EntityTypeId) -> Result<String, ModelError> {
        let et = self.entity_type(id)?;

        if et.shared_clr_type {
            Ok(format!("{} ({})", et.name, self.shape(et.shape)?.short_name()))
        } else {
            Ok(et.name.clone())
        }
    }

    /// Entity type name without qualifiers or ownership path.
    pub fn short_name(&self, id: EntityTypeId) -> Result<String, ModelError> {
        let name = &self.entity_type(id)?.name;

        Ok(match name.rfind('#') {
            Some(pos) => name[pos + 1..].to_string(),
            None => shape::short_name(name).to_string(),
        })
    }

    //
    // hierarchy
    //

    /// `other` is `id` or derives from it.
    pub fn is_assignable_from(
        &self,
        id: EntityTypeId,
        other: EntityTypeId,
    ) -> Result<bool, ModelError> {
        self.entity_type(id)?;

        Ok(self.base_chain(other)?.contains(&id))
    }

    pub fn is_strictly_derived_from(
        &self,
        id: EntityTypeId,
        other: EntityTypeId,
    ) -> Result<bool, ModelError> {
        Ok(id != other && self.is_assignable_from(other, id)?)
    }

    /// The less derived of two types in the same hierarchy line.
    pub fn least_derived_type(
        &self,
        id: EntityTypeId,
        other: EntityTypeId,
    ) -> Result<Option<EntityTypeId>, ModelError> {
        if self.is_assignable_from(id, other)? {
            Ok(Some(id))
        } else if self.is_assignable_from(other, id)? {
            Ok(Some(other))
        } else {
            Ok(None)
        }
    }

    pub fn discriminator_value(&self, id: EntityTypeId) -> Result<Option<&str>, ModelError> {
        Ok(self.entity_type(id)?.discriminator_value.as_deref())
    }

    //
    // keys and members
    //

    /// The primary key when declared on `id`; derived types declare none.
    pub fn find_declared_primary_key(&self, id: EntityTypeId) -> Result<Option<KeyId>, ModelError> {
        let et = self.entity_type(id)?;

        Ok(if et.is_root() { et.primary_key } else { None })
    }

    /// The primary key in effect for `id`, taken from its root type.
    pub fn find_primary_key(&self, id: EntityTypeId) -> Result<Option<KeyId>, ModelError> {
        let root = self.root_type(id)?;

        Ok(self.entity_type(root)?.primary_key)
    }

    /// A declared member with `name` on `id` only.
    pub fn find_declared_member(
        &self,
        id: EntityTypeId,
        name: &str,
    ) -> Result<Option<MemberRef>, ModelError> {
        let et = self.entity_type(id)?;

        for &p in &et.properties {
            if self.property(p)?.name == name {
                return Ok(Some(MemberRef::Property(p)));
            }
        }
        for &n in &et.navigations {
            if self.navigation(n)?.name == name {
                return Ok(Some(MemberRef::Navigation(n)));
            }
        }
        for &n in &et.skip_navigations {
            if self.skip_navigation(n)?.name == name {
                return Ok(Some(MemberRef::SkipNavigation(n)));
            }
        }
        for &s in &et.service_properties {
            if self.service_property(s)?.name == name {
                return Ok(Some(MemberRef::ServiceProperty(s)));
            }
        }

        Ok(None)
    }

    /// A property with `name` on `id` or any of its base types.
    pub fn find_property(
        &self,
        id: EntityTypeId,
        name: &str,
    ) -> Result<Option<PropertyId>, ModelError> {
        for et in self.base_chain(id)? {
            if let Some(MemberRef::Property(p)) = self.find_declared_member(et, name)? {
                return Ok(Some(p));
            }
        }

        Ok(None)
    }

    /// Properties visible on `id`, base type members first.
    pub fn properties(&self, id: EntityTypeId) -> Result<Vec<PropertyId>, ModelError> {
        let mut out = Vec::new();
        for et in self.base_chain(id)?.into_iter().rev() {
            out.extend_from_slice(&self.entity_type(et)?.properties);
        }

        Ok(out)
    }

    /// Navigations visible on `id`, base type members first.
    pub fn navigations(&self, id: EntityTypeId) -> Result<Vec<NavigationId>, ModelError> {
        let mut out = Vec::new();
        for et in self.base_chain(id)?.into_iter().rev() {
            out.extend_from_slice(&self.entity_type(et)?.navigations);
        }

        Ok(out)
    }

    /// Foreign keys visible on `id`, declared first, then each base in turn.
    pub fn foreign_keys_of(&self, id: EntityTypeId) -> Result<Vec<ForeignKeyId>, ModelError> {
        let mut out = Vec::new();
        for et in self.base_chain(id)? {
            out.extend_from_slice(&self.entity_type(et)?.foreign_keys);
        }

        Ok(out)
    }

    pub fn properties_and_navigations(&self, id: EntityTypeId) -> Result<Vec<MemberRef>, ModelError> {
        let mut out: Vec<MemberRef> = self
            .properties(id)?
            .into_iter()
            .map(MemberRef::Property)
            .collect();
        out.extend(self.navigations(id)?.into_iter().map(MemberRef::Navigation));

        Ok(out)
    }

    /// Navigations named `name` declared on types derived from `id`.
    pub fn find_derived_navigations(
        &self,
        id: EntityTypeId,
        name: &str,
    ) -> Result<Vec<NavigationId>, ModelError> {
        let mut out = Vec::new();
        for derived in self.derived_types(id)? {
            for &nav in &self.entity_type(derived)?.navigations {
                if self.navigation(nav)?.name == name {
                    out.push(nav);
                }
            }
        }

        Ok(out)
    }

    /// Resolve the shape member backing navigation `name` on `id`.
    pub fn navigation_member_info(
        &self,
        id: EntityTypeId,
        name: &str,
    ) -> Result<&MemberBinding, ModelError> {
        let shape = self.entity_type(id)?.shape;

        self.find_member_binding(shape, name)?
            .ok_or_else(|| match self.display_name(id) {
                Ok(display) => ModelError::no_clr_navigation(name, &display),
                Err(err) => err,
            })
    }

    /// Return `property` when it can be used with instances of `id`.
    pub fn check_property_belongs_to_type(
        &self,
        id: EntityTypeId,
        property: PropertyId,
    ) -> Result<PropertyId, ModelError> {
        let declaring = self.property(property)?.declaring_type;

        if !self.is_assignable_from(declaring, id)? {
            return Err(ModelError::property_does_not_belong(
                &self.property(property)?.name,
                &self.display_name(declaring)?,
                &self.display_name(id)?,
            ));
        }

        Ok(property)
    }

    //
    // change tracking
    //

    pub fn use_eager_snapshots(&self, id: EntityTypeId) -> Result<bool, ModelError> {
        Ok(self
            .entity_type(id)?
            .change_tracking_strategy
            .uses_eager_snapshots())
    }

    //
    // counts
    //

    pub fn counts(&self, id: EntityTypeId) -> Result<PropertyCounts, ModelError> {
        let et = self.entity_type(id)?;

        et.counts
            .ok_or_else(|| ModelError::counts_not_computed(&et.name))
    }

    pub fn property_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.property_count)
    }

    pub fn navigation_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.navigation_count)
    }

    pub fn original_value_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.original_value_count)
    }

    pub fn shadow_property_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.shadow_count)
    }

    pub fn relationship_property_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.relationship_count)
    }

    pub fn store_generated_count(&self, id: EntityTypeId) -> Result<usize, ModelError> {
        Ok(self.counts(id)?.store_generated_count)
    }

    /// Slot record of any member; `None` until finalized.
    pub fn member_indexes(
        &self,
        member: MemberRef,
    ) -> Result<Option<PropertyIndexes>, ModelError> {
        Ok(match member {
            MemberRef::Property(id) => self.property(id)?.slots,
            MemberRef::Navigation(id) => self.navigation(id)?.slots,
            MemberRef::SkipNavigation(id) => self.skip_navigation(id)?.slots,
            MemberRef::ServiceProperty(id) => self.service_property(id)?.slots,
        })
    }
}

#[cfg(test)]
mod tests;
