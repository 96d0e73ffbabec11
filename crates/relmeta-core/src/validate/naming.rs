use crate::{
    MAX_ENTITY_NAME_LEN,
    error::ModelError,
    model::{EntityTypeId, MemberRef, ModelData},
    obs::ValidationCode,
    validate::{Report, route},
};
use std::collections::BTreeMap;

/// Entity type names must be non-empty ASCII within the length limit, and
/// member names must stay unique across each inheritance line.
pub fn validate_names(model: &ModelData, report: &mut Report<'_>) {
    for (id, et) in model.entity_types() {
        let route = route(model, id);

        if et.name.is_empty() {
            report.error(ValidationCode::InvalidName, &route, "entity type name is empty");
        } else if !et.name.is_ascii() {
            report.error(
                ValidationCode::InvalidName,
                &route,
                format!("entity type name '{}' must be ASCII", et.name),
            );
        } else if et.name.len() > MAX_ENTITY_NAME_LEN {
            report.error(
                ValidationCode::InvalidName,
                &route,
                format!(
                    "entity type name '{}' exceeds max length {MAX_ENTITY_NAME_LEN}",
                    et.name
                ),
            );
        }

        validate_member_names(model, id, &route, report);
    }
}

// members re-declared on a base after re-parenting
fn validate_member_names(model: &ModelData, id: EntityTypeId, route: &str, report: &mut Report<'_>) {
    let chain = match model.base_chain(id) {
        Ok(chain) => chain,
        // reported by the hierarchy pass
        Err(_) => return,
    };

    let mut seen: BTreeMap<String, EntityTypeId> = BTreeMap::new();
    for et in chain {
        let members = match declared_member_names(model, et) {
            Ok(members) => members,
            Err(err) => {
                report.fail(route, &err);
                return;
            }
        };

        for name in members {
            if let Some(prev) = seen.insert(name.clone(), et)
                && prev == id
            {
                report.error(
                    ValidationCode::DuplicateMember,
                    route,
                    format!(
                        "member '{name}' is declared on both '{route}' and its base type '{}'",
                        super::route(model, et),
                    ),
                );
            }
        }
    }
}

fn declared_member_names(
    model: &ModelData,
    id: EntityTypeId,
) -> Result<Vec<String>, ModelError> {
    let et = model.entity_type(id)?;
    let mut members: Vec<MemberRef> = Vec::new();
    members.extend(et.declared_properties().iter().copied().map(MemberRef::Property));
    members.extend(et.declared_navigations().iter().copied().map(MemberRef::Navigation));
    members.extend(
        et.declared_skip_navigations()
            .iter()
            .copied()
            .map(MemberRef::SkipNavigation),
    );
    members.extend(
        et.declared_service_properties()
            .iter()
            .copied()
            .map(MemberRef::ServiceProperty),
    );

    members
        .into_iter()
        .map(|m| model.member_name(m).map(str::to_string))
        .collect()
}
