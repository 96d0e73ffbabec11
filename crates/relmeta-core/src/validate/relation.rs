use crate::{
    error::{ErrorOrigin, ModelError},
    model::{ChangeTrackingStrategy, EntityTypeId, MemberBinding, ModelData},
    obs::ValidationCode,
    validate::{Report, route},
};

/// Foreign keys, navigations, ownership, and redundant indexes.
pub fn validate_relations(model: &ModelData, report: &mut Report<'_>) {
    for (id, _) in model.entity_types() {
        let route = route(model, id);

        let results = [
            validate_foreign_keys(model, id, &route, report),
            validate_ownership(model, id, &route, report),
            validate_navigations(model, id, &route, report),
            validate_indexes(model, id, &route, report),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            report.fail(&route, &err);
        }
    }
}

fn validate_foreign_keys(
    model: &ModelData,
    id: EntityTypeId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    for &fk_id in model.entity_type(id)?.declared_foreign_keys() {
        let fk = model.foreign_key(fk_id)?;
        let principal = model.key(fk.principal_key)?;

        if fk.properties.len() != principal.properties.len() {
            report.error(
                ValidationCode::ForeignKeyArity,
                route,
                format!(
                    "foreign key to '{}' has {} properties but the principal key has {}",
                    super::route(model, fk.principal_type),
                    fk.properties.len(),
                    principal.properties.len()
                ),
            );
        }
    }

    Ok(())
}

// at most one owner, and no owner may own itself through the path
fn validate_ownership(
    model: &ModelData,
    id: EntityTypeId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    let mut ownerships = 0;
    for &fk in model.entity_type(id)?.declared_foreign_keys() {
        if model.foreign_key(fk)?.ownership {
            ownerships += 1;
        }
    }
    if ownerships > 1 {
        report.error(
            ValidationCode::MultipleOwnerships,
            route,
            format!("the entity type declares {ownerships} ownerships; at most one is allowed"),
        );
    }

    // base chain cycles are reported by the hierarchy pass
    if let Err(err) = model.ownership_path(id)
        && err.origin == ErrorOrigin::Ownership
    {
        report.error(ValidationCode::CircularOwnership, route, err.message);
    }

    Ok(())
}

fn validate_navigations(
    model: &ModelData,
    id: EntityTypeId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    let et = model.entity_type(id)?;
    let snapshot = et.change_tracking_strategy == ChangeTrackingStrategy::Snapshot;

    for &nav_id in et.declared_navigations() {
        let nav = model.navigation(nav_id)?;
        check_navigation(&nav.name, nav.collection, nav.member.as_ref(), snapshot, route, report);
    }
    for &nav_id in et.declared_skip_navigations() {
        let nav = model.skip_navigation(nav_id)?;
        check_navigation(&nav.name, nav.collection, nav.member.as_ref(), snapshot, route, report);
    }

    Ok(())
}

// the bound member must agree on collection-ness; unbound collections are
// never snapshotted
fn check_navigation(
    name: &str,
    collection: bool,
    member: Option<&MemberBinding>,
    snapshot: bool,
    route: &str,
    report: &mut Report<'_>,
) {
    match member {
        Some(member) if member.collection != collection => report.error(
            ValidationCode::CollectionMismatch,
            route,
            format!(
                "navigation '{name}' is a {} but its member is {}",
                if collection { "collection" } else { "reference" },
                if member.collection {
                    "a collection"
                } else {
                    "not a collection"
                },
            ),
        ),
        None if collection && snapshot => report.warn(
            ValidationCode::ShadowNavigation,
            route,
            format!("collection navigation '{name}' has no member and will not be snapshotted"),
        ),
        _ => {}
    }
}

// a non-unique index covered by a longer index on the same type
fn validate_indexes(
    model: &ModelData,
    id: EntityTypeId,
    route: &str,
    report: &mut Report<'_>,
) -> Result<(), ModelError> {
    let indexes = model.entity_type(id)?.declared_indexes();

    for &a in indexes {
        let index = model.index(a)?;
        if index.unique {
            continue;
        }

        for &b in indexes {
            if a != b && index.is_prefix_of(model.index(b)?) {
                report.warn(
                    ValidationCode::RedundantIndex,
                    route,
                    format!("index {a} is a prefix of index {b}"),
                );
                break;
            }
        }
    }

    Ok(())
}
