use crate::{
    error::ModelError,
    model::{ChangeTrackingStrategy, ModelData, Property, PropertyId, ValueGenerated},
};
use std::collections::BTreeSet;

///
/// IndexPolicy
///
/// Provider-supplied predicates deciding which optional slots a property
/// receives. Both are consulted once per declared property during
/// finalization.
///

pub trait IndexPolicy: Send + Sync {
    /// The property needs a slot in the original-values array.
    fn requires_original_value(
        &self,
        model: &ModelData,
        property: PropertyId,
    ) -> Result<bool, ModelError>;

    /// The property may receive its value from the store on save.
    fn may_be_store_generated(
        &self,
        model: &ModelData,
        property: PropertyId,
    ) -> Result<bool, ModelError>;
}

///
/// DefaultIndexPolicy
///
/// Original values are kept unless instances raise changing notifications,
/// except for concurrency tokens, keys, foreign keys, and unique-index
/// members. Store generation follows the generation flag, and foreign-key
/// properties inherit it from the principal property they reference.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultIndexPolicy;

impl IndexPolicy for DefaultIndexPolicy {
    fn requires_original_value(
        &self,
        model: &ModelData,
        property: PropertyId,
    ) -> Result<bool, ModelError> {
        let property = model.property(property)?;
        let strategy = model
            .entity_type(property.declaring_type)?
            .change_tracking_strategy;

        if strategy != ChangeTrackingStrategy::ChangingAndChangedNotifications
            || property.concurrency_token
            || property.is_key()
            || property.is_foreign_key()
        {
            return Ok(true);
        }

        for &index in property.containing_indexes() {
            if model.index(index)?.unique {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn may_be_store_generated(
        &self,
        model: &ModelData,
        id: PropertyId,
    ) -> Result<bool, ModelError> {
        let property = model.property(id)?;
        if generated_by_store(property) {
            return Ok(true);
        }
        if !property.is_foreign_key() {
            return Ok(false);
        }

        Ok(find_generation_property(model, id)?.is_some())
    }
}

const fn generated_by_store(property: &Property) -> bool {
    !matches!(property.value_generated, ValueGenerated::Never) && !property.client_generated
}

/// Follow foreign keys from `property` to a principal property whose value
/// is generated by the store. Cycles in foreign-key chains end the search.
pub fn find_generation_property(
    model: &ModelData,
    property: PropertyId,
) -> Result<Option<PropertyId>, ModelError> {
    let mut visited = BTreeSet::from([property]);
    let mut pending = principal_properties(model, property)?;

    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }

        if generated_by_store(model.property(id)?) {
            return Ok(Some(id));
        }
        pending.extend(principal_properties(model, id)?);
    }

    Ok(None)
}

// principal_properties
// the principal key property paired with `property` in each of its foreign keys
fn principal_properties(
    model: &ModelData,
    property: PropertyId,
) -> Result<Vec<PropertyId>, ModelError> {
    let mut out = Vec::new();

    for &fk_id in model.property(property)?.containing_foreign_keys() {
        let fk = model.foreign_key(fk_id)?;
        let key = model.key(fk.principal_key)?;

        for (position, &dependent) in fk.properties.iter().enumerate() {
            if dependent != property {
                continue;
            }
            if let Some(&principal) = key.properties.get(position) {
                out.push(principal);
            }
        }
    }

    Ok(out)
}
