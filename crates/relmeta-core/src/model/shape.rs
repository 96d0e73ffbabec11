use crate::model::ShapeId;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// MemberKind
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum MemberKind {
    Field,
    #[default]
    Property,
}

///
/// MemberBinding
///
/// Resolved accessor descriptor for one named member of a mapped shape.
/// Bindings are registered once during configuration and looked up by name.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MemberBinding {
    pub name: String,
    pub kind: MemberKind,
    pub collection: bool,
}

impl MemberBinding {
    #[must_use]
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            collection: false,
        }
    }

    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            collection: false,
        }
    }

    #[must_use]
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            collection: true,
        }
    }
}

///
/// Shape
///
/// The in-memory class an entity type is mapped to: a name, an optional
/// base shape, and its binding table of declared members.
///

#[derive(Clone, Debug, Serialize)]
pub struct Shape {
    pub name: String,
    pub base: Option<ShapeId>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) members: BTreeMap<String, MemberBinding>,
}

impl Shape {
    pub(crate) const fn new(name: String, base: Option<ShapeId>) -> Self {
        Self {
            name,
            base,
            members: BTreeMap::new(),
        }
    }

    /// Look up a member declared directly on this shape.
    #[must_use]
    pub fn declared_member(&self, name: &str) -> Option<&MemberBinding> {
        self.members.get(name)
    }

    pub fn declared_members(&self) -> impl Iterator<Item = &MemberBinding> {
        self.members.values()
    }

    /// Name without any namespace qualifier.
    #[must_use]
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }
}

// short_name
// strips `.`, `::`, and `+` qualifiers
pub(crate) fn short_name(name: &str) -> &str {
    name.rfind(['.', ':', '+'])
        .map_or(name, |pos| &name[pos + 1..])
}
