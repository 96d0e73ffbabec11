use crate::{
    error::ModelError,
    model::{EntityTypeId, KeyId, ModelData, PropertyId},
    obs::ValidationCode,
    validate::{Report, route},
};
use std::collections::BTreeMap;

/// Inheritance chains, discriminators, and key placement.
pub fn validate_hierarchy(model: &ModelData, report: &mut Report<'_>) {
    let mut discriminators: BTreeMap<(EntityTypeId, String), EntityTypeId> = BTreeMap::new();

    for (id, et) in model.entity_types() {
        let route = route(model, id);

        let root = match model.root_type(id) {
            Ok(root) => root,
            Err(err) => {
                report.error(ValidationCode::CircularInheritance, &route, err.message);
                continue;
            }
        };

        // discriminators are unique within one hierarchy
        if let Some(value) = &et.discriminator_value
            && let Some(prev) = discriminators.insert((root, value.clone()), id)
        {
            report.error(
                ValidationCode::DuplicateDiscriminator,
                &route,
                format!(
                    "discriminator value '{value}' is already used by '{}'",
                    super::route(model, prev)
                ),
            );
        }

        if let Err(err) = validate_keys(model, id, &route, report) {
            report.fail(&route, &err);
        }
    }
}

fn validate_keys(
    model: &ModelData,
    id: EntityTypeId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    let et = model.entity_type(id)?;

    match (et.is_root(), et.declared_primary_key()) {
        (false, Some(_)) => report.error(
            ValidationCode::DerivedPrimaryKey,
            route,
            "a derived type cannot declare a primary key; it is inherited from the root type",
        ),
        (true, None) if !model.is_owned(id)? => report.error(
            ValidationCode::MissingPrimaryKey,
            route,
            "the entity type requires a primary key to be defined",
        ),
        (true, Some(pk)) => warn_shadow_key(model, pk, route, report)?,
        _ => {}
    }

    for &key in et.declared_keys() {
        check_members(model, id, &model.key(key)?.properties, route, report)?;
    }
    for &index in et.declared_indexes() {
        check_members(model, id, &model.index(index)?.properties, route, report)?;
    }

    Ok(())
}

// primary keys with no backing member are legal but usually accidental
fn warn_shadow_key(
    model: &ModelData,
    pk: KeyId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    for &property in &model.key(pk)?.properties {
        let property = model.property(property)?;
        if property.is_shadow() {
            report.warn(
                ValidationCode::ShadowKeyProperty,
                route,
                format!(
                    "primary key property '{}' has no member on the mapped shape",
                    property.name
                ),
            );
        }
    }

    Ok(())
}

// keys and indexes only reference properties of the type hierarchy
fn check_members(
    model: &ModelData,
    id: EntityTypeId,
    properties: &[PropertyId],
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    for &property in properties {
        let declaring = model.property(property)?.declaring_type;
        if !model.is_assignable_from(declaring, id)? {
            report.error(
                ValidationCode::UnknownProperty,
                route,
                format!(
                    "property '{}' of '{}' is not part of this type hierarchy",
                    model.property(property)?.name,
                    super::route(model, declaring)
                ),
            );
        }
    }

    Ok(())
}
