//! Slot layout calculation.
//!
//! Each entity type's members are assigned positions in six packed arrays.
//! A derived type continues every counter from its base type's totals, so
//! inherited members keep their positions and new members always sort
//! after them.

mod policy;

#[cfg(test)]
mod tests;

pub use policy::{DefaultIndexPolicy, IndexPolicy, find_generation_property};

use crate::{
    error::{ErrorOrigin, ModelError},
    model::{
        EntityTypeId, MemberRef, ModelData, MutableModel, NOT_APPLICABLE, PropertyCounts,
        PropertyIndexes,
    },
};
use tracing::trace;

///
/// CountsLayout
///
/// Result of one counts calculation: the totals for an entity type and the
/// indexes of each member declared directly on it, in assignment order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountsLayout {
    pub entity_type: EntityTypeId,
    pub counts: PropertyCounts,
    pub members: Vec<(MemberRef, PropertyIndexes)>,
}

impl CountsLayout {
    /// Indexes assigned to `member`, if it is declared on this type.
    #[must_use]
    pub fn indexes_of(&self, member: MemberRef) -> Option<PropertyIndexes> {
        self.members
            .iter()
            .find(|(m, _)| *m == member)
            .map(|(_, indexes)| *indexes)
    }
}

///
/// Counters
///

#[derive(Default)]
struct Counters {
    property: usize,
    navigation: usize,
    original_value: usize,
    shadow: usize,
    relationship: usize,
    store_generated: usize,
}

impl Counters {
    const fn seeded(base: PropertyCounts) -> Self {
        Self {
            property: base.property_count,
            navigation: base.navigation_count,
            original_value: base.original_value_count,
            shadow: base.shadow_count,
            relationship: base.relationship_count,
            store_generated: base.store_generated_count,
        }
    }

    const fn totals(&self) -> PropertyCounts {
        PropertyCounts::new(
            self.property,
            self.navigation,
            self.original_value,
            self.shadow,
            self.relationship,
            self.store_generated,
        )
    }
}

// take the counter's current value as a slot, then advance it
fn next(counter: &mut usize) -> Result<i32, ModelError> {
    let slot = i32::try_from(*counter).map_err(|_| {
        ModelError::invariant(
            ErrorOrigin::Counts,
            format!("slot index {counter} does not fit the packed index range"),
        )
    })?;
    *counter += 1;

    Ok(slot)
}

fn next_if(condition: bool, counter: &mut usize) -> Result<i32, ModelError> {
    if condition {
        next(counter)
    } else {
        Ok(NOT_APPLICABLE)
    }
}

/// Compute the slot layout for `entity_type` without mutating the model.
///
/// Base type totals are read from the base when already assigned and are
/// otherwise computed on the fly, so the result does not depend on the
/// order in which types are visited.
pub fn calculate_counts(
    model: &ModelData,
    entity_type: EntityTypeId,
    policy: &dyn IndexPolicy,
) -> Result<CountsLayout, ModelError> {
    let et = model.entity_type(entity_type)?;

    let mut counters = match et.base_type {
        Some(base) => Counters::seeded(base_counts(model, base, policy)?),
        None => Counters::default(),
    };
    let mut members = Vec::new();

    // properties
    for &id in &et.properties {
        let property = model.property(id)?;
        let indexes = PropertyIndexes::new(
            next(&mut counters.property)?,
            next_if(
                policy.requires_original_value(model, id)?,
                &mut counters.original_value,
            )?,
            next_if(property.is_shadow(), &mut counters.shadow)?,
            next_if(
                property.is_key() || property.is_foreign_key(),
                &mut counters.relationship,
            )?,
            next_if(
                policy.may_be_store_generated(model, id)?,
                &mut counters.store_generated,
            )?,
        );
        members.push((MemberRef::Property(id), indexes));
    }

    // navigations, then skip navigations
    let notifying = et.change_tracking_strategy.is_notifying();
    let mut navigations = Vec::new();
    for &id in &et.navigations {
        let nav = model.navigation(id)?;
        navigations.push((MemberRef::Navigation(id), nav.is_shadow(), nav.is_collection()));
    }
    for &id in &et.skip_navigations {
        let nav = model.skip_navigation(id)?;
        navigations.push((MemberRef::SkipNavigation(id), nav.is_shadow(), nav.is_collection()));
    }
    for (member, shadow, collection) in navigations {
        let indexes = PropertyIndexes::new(
            next(&mut counters.navigation)?,
            NOT_APPLICABLE,
            next_if(shadow, &mut counters.shadow)?,
            next_if(!(collection && notifying), &mut counters.relationship)?,
            NOT_APPLICABLE,
        );
        members.push((member, indexes));
    }

    // service properties occupy no array
    for &id in &et.service_properties {
        members.push((MemberRef::ServiceProperty(id), PropertyIndexes::NONE));
    }

    let layout = CountsLayout {
        entity_type,
        counts: counters.totals(),
        members,
    };
    trace!(entity_type = %et.name, counts = ?layout.counts, "calculated property counts");

    Ok(layout)
}

fn base_counts(
    model: &ModelData,
    base: EntityTypeId,
    policy: &dyn IndexPolicy,
) -> Result<PropertyCounts, ModelError> {
    match model.entity_type(base)?.counts() {
        Some(counts) => Ok(counts),
        None => Ok(calculate_counts(model, base, policy)?.counts),
    }
}

/// Compute and store the layout of one entity type.
pub fn assign_counts(
    model: &mut MutableModel,
    entity_type: EntityTypeId,
    policy: &dyn IndexPolicy,
) -> Result<PropertyCounts, ModelError> {
    let layout = calculate_counts(model, entity_type, policy)?;
    model.apply_layout(&layout)?;

    Ok(layout.counts)
}

/// Assign layouts to every entity type, base types before derived types.
pub fn assign_all_counts(
    model: &mut MutableModel,
    policy: &dyn IndexPolicy,
) -> Result<(), ModelError> {
    for id in model.hierarchy_order()? {
        assign_counts(model, id, policy)?;
    }

    Ok(())
}
