use crate::{
    error::{ErrorOrigin, ModelError},
    model::{
        EntityType, EntityTypeId, ForeignKey, ForeignKeyId, Index, IndexId, Key, KeyId,
        MemberBinding, ModelDependencies, ModelStage, Navigation, NavigationId, Property,
        PropertyId, ServiceProperty, ServicePropertyId, Shape, ShapeId, SkipNavigation,
        SkipNavigationId,
    },
};
use serde::Serialize;
use std::collections::BTreeSet;

///
/// MemberRef
///
/// Any member that can carry a `PropertyIndexes` record.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum MemberRef {
    Property(PropertyId),
    Navigation(NavigationId),
    SkipNavigation(SkipNavigationId),
    ServiceProperty(ServicePropertyId),
}

///
/// ModelData
///
/// Arena shared by both model stages. Read access only; mutation goes
/// through `MutableModel`.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ModelData {
    pub(crate) shapes: Vec<Shape>,
    pub(crate) entity_types: Vec<EntityType>,
    pub(crate) properties: Vec<Property>,
    pub(crate) navigations: Vec<Navigation>,
    pub(crate) skip_navigations: Vec<SkipNavigation>,
    pub(crate) service_properties: Vec<ServiceProperty>,
    pub(crate) keys: Vec<Key>,
    pub(crate) foreign_keys: Vec<ForeignKey>,
    pub(crate) indexes: Vec<Index>,

    #[serde(skip)]
    pub(crate) dependencies: Option<ModelDependencies>,
    pub(crate) stage: ModelStage,
}

// arena_get
// checked lookup that reports ids from another model as misuse
macro_rules! arena_get {
    ($fn_name:ident, $field:ident, $id:ty, $node:ty, $origin:expr) => {
        pub fn $fn_name(&self, id: $id) -> Result<&$node, ModelError> {
            self.$field
                .get(id.index())
                .ok_or_else(|| ModelError::misuse($origin, format!("unknown {id}")))
        }
    };
}

impl ModelData {
    arena_get!(shape, shapes, ShapeId, Shape, ErrorOrigin::Shape);
    arena_get!(entity_type, entity_types, EntityTypeId, EntityType, ErrorOrigin::EntityType);
    arena_get!(property, properties, PropertyId, Property, ErrorOrigin::Property);
    arena_get!(navigation, navigations, NavigationId, Navigation, ErrorOrigin::Navigation);
    arena_get!(
        skip_navigation,
        skip_navigations,
        SkipNavigationId,
        SkipNavigation,
        ErrorOrigin::Navigation
    );
    arena_get!(
        service_property,
        service_properties,
        ServicePropertyId,
        ServiceProperty,
        ErrorOrigin::Property
    );
    arena_get!(key, keys, KeyId, Key, ErrorOrigin::Key);
    arena_get!(foreign_key, foreign_keys, ForeignKeyId, ForeignKey, ErrorOrigin::ForeignKey);
    arena_get!(index, indexes, IndexId, Index, ErrorOrigin::Key);

    #[must_use]
    pub const fn stage(&self) -> ModelStage {
        self.stage
    }

    /// Runtime services attached by the initializer, if any.
    #[must_use]
    pub const fn dependencies(&self) -> Option<&ModelDependencies> {
        self.dependencies.as_ref()
    }

    pub fn entity_types(&self) -> impl Iterator<Item = (EntityTypeId, &EntityType)> {
        self.entity_types
            .iter()
            .enumerate()
            .map(|(i, et)| (EntityTypeId::new(i), et))
    }

    #[must_use]
    pub fn entity_type_count(&self) -> usize {
        self.entity_types.len()
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (ShapeId::new(i), shape))
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (ForeignKeyId, &ForeignKey)> {
        self.foreign_keys
            .iter()
            .enumerate()
            .map(|(i, fk)| (ForeignKeyId::new(i), fk))
    }

    #[must_use]
    pub fn find_entity_type(&self, name: &str) -> Option<EntityTypeId> {
        self.entity_types()
            .find(|(_, et)| et.name == name)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn find_shape(&self, name: &str) -> Option<ShapeId> {
        self.shapes()
            .find(|(_, shape)| shape.name == name)
            .map(|(id, _)| id)
    }

    /// The type itself followed by each base type up to the root.
    pub fn base_chain(&self, id: EntityTypeId) -> Result<Vec<EntityTypeId>, ModelError> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut current = Some(id);

        while let Some(cur) = current {
            if !seen.insert(cur) {
                return Err(ModelError::configuration(
                    ErrorOrigin::EntityType,
                    format!(
                        "the base type chain of '{}' is circular",
                        self.entity_type(id)?.name
                    ),
                ));
            }
            chain.push(cur);
            current = self.entity_type(cur)?.base_type;
        }

        Ok(chain)
    }

    pub fn root_type(&self, id: EntityTypeId) -> Result<EntityTypeId, ModelError> {
        let chain = self.base_chain(id)?;

        Ok(chain.last().copied().unwrap_or(id))
    }

    /// Every entity type ordered so that base types come before derived
    /// types; ties keep declaration order.
    pub fn hierarchy_order(&self) -> Result<Vec<EntityTypeId>, ModelError> {
        let mut depths = Vec::with_capacity(self.entity_types.len());
        for (id, _) in self.entity_types() {
            depths.push((self.base_chain(id)?.len(), id));
        }
        depths.sort();

        Ok(depths.into_iter().map(|(_, id)| id).collect())
    }

    /// Entity types whose base chain strictly includes `id`.
    pub fn derived_types(&self, id: EntityTypeId) -> Result<Vec<EntityTypeId>, ModelError> {
        let mut derived = Vec::new();
        for (other, _) in self.entity_types() {
            if other != id && self.base_chain(other)?.contains(&id) {
                derived.push(other);
            }
        }

        Ok(derived)
    }

    /// Resolve a member name through the shape and its base shapes.
    pub fn find_member_binding(
        &self,
        shape: ShapeId,
        name: &str,
    ) -> Result<Option<&MemberBinding>, ModelError> {
        let mut current = Some(shape);
        while let Some(id) = current {
            let shape = self.shape(id)?;
            if let Some(binding) = shape.declared_member(name) {
                return Ok(Some(binding));
            }
            current = shape.base;
        }

        Ok(None)
    }

    /// Whether a value of shape `target` can be used where `shape` is expected.
    pub fn shape_is_assignable_from(
        &self,
        shape: ShapeId,
        target: ShapeId,
    ) -> Result<bool, ModelError> {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == shape {
                return Ok(true);
            }
            current = self.shape(id)?.base;
        }

        Ok(false)
    }

    /// Name of the member referenced by `member`, for diagnostics.
    pub fn member_name(&self, member: MemberRef) -> Result<&str, ModelError> {
        Ok(match member {
            MemberRef::Property(id) => &self.property(id)?.name,
            MemberRef::Navigation(id) => &self.navigation(id)?.name,
            MemberRef::SkipNavigation(id) => &self.skip_navigation(id)?.name,
            MemberRef::ServiceProperty(id) => &self.service_property(id)?.name,
        })
    }
}
