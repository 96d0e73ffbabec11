use crate::{
    counts::{self, CountsLayout, IndexPolicy},
    error::{ErrorOrigin, ModelError},
    model::{
        ChangeTrackingStrategy, EntityType, EntityTypeId, ForeignKey, ForeignKeyId,
        ForeignKeyOptions, FrozenModel, Index, IndexId, Key, KeyId, MemberBinding, MemberRef,
        ModelData, ModelDependencies, ModelStage, Navigation, NavigationConfig, NavigationId,
        Property, PropertyConfig, PropertyId, ServiceProperty, ServicePropertyId, Shape, ShapeId,
        SkipNavigation, SkipNavigationConfig, SkipNavigationId,
    },
};
use std::ops::Deref;

///
/// MutableModel
///
/// Configuring stage of the metadata model. Every builder call validates
/// its own inputs and fails before mutating anything; whole-model rules
/// are left to the validator.
///

#[derive(Clone, Debug, Default)]
pub struct MutableModel {
    data: ModelData,
}

impl MutableModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // shapes
    //

    pub fn add_shape(
        &mut self,
        name: impl Into<String>,
        base: Option<ShapeId>,
    ) -> Result<ShapeId, ModelError> {
        let name = name.into();
        if self.data.find_shape(&name).is_some() {
            return Err(ModelError::configuration(
                ErrorOrigin::Shape,
                format!("shape '{name}' is already registered"),
            ));
        }
        if let Some(base) = base {
            self.data.shape(base)?;
        }

        let id = ShapeId::new(self.data.shapes.len());
        self.data.shapes.push(Shape::new(name, base));

        Ok(id)
    }

    /// Register a member in the shape's binding table.
    pub fn bind_member(&mut self, shape: ShapeId, binding: MemberBinding) -> Result<(), ModelError> {
        let node = self.data.shape(shape)?;
        if node.declared_member(&binding.name).is_some() {
            return Err(ModelError::configuration(
                ErrorOrigin::Shape,
                format!(
                    "member '{}' is already bound on shape '{}'",
                    binding.name, node.name
                ),
            ));
        }

        self.data.shapes[shape.index()]
            .members
            .insert(binding.name.clone(), binding);

        Ok(())
    }

    //
    // entity types
    //

    pub fn add_entity_type(
        &mut self,
        name: impl Into<String>,
        shape: ShapeId,
        base: Option<EntityTypeId>,
    ) -> Result<EntityTypeId, ModelError> {
        let name = name.into();
        self.ensure_entity_name_free(&name)?;

        if let Some((_, existing)) = self
            .data
            .entity_types()
            .find(|(_, et)| et.shape == shape && !et.shared_clr_type)
        {
            return Err(ModelError::configuration(
                ErrorOrigin::EntityType,
                format!(
                    "shape '{}' is already mapped by entity type '{}'",
                    self.data.shape(shape)?.name,
                    existing.name
                ),
            ));
        }
        if let Some(base) = base {
            self.ensure_base_compatible(shape, base)?;
        } else {
            self.data.shape(shape)?;
        }

        Ok(self.push_entity_type(EntityType::new(name, shape, base, false)))
    }

    /// Add an entity type whose shape may be mapped by other entity types
    /// (owned or property-bag types).
    pub fn add_shared_entity_type(
        &mut self,
        name: impl Into<String>,
        shape: ShapeId,
    ) -> Result<EntityTypeId, ModelError> {
        let name = name.into();
        self.ensure_entity_name_free(&name)?;
        self.data.shape(shape)?;

        Ok(self.push_entity_type(EntityType::new(name, shape, None, true)))
    }

    /// Re-parent an entity type, rejecting changes that would make the
    /// inheritance chain circular.
    pub fn set_base_type(
        &mut self,
        entity_type: EntityTypeId,
        base: Option<EntityTypeId>,
    ) -> Result<(), ModelError> {
        let et = self.data.entity_type(entity_type)?;

        if let Some(base) = base {
            self.ensure_base_compatible(et.shape, base)?;

            if self.data.base_chain(base)?.contains(&entity_type) {
                return Err(ModelError::configuration(
                    ErrorOrigin::EntityType,
                    format!(
                        "'{}' cannot derive from '{}' because '{}' already derives from it",
                        et.name,
                        self.data.entity_type(base)?.name,
                        self.data.entity_type(base)?.name,
                    ),
                ));
            }
            if et.primary_key.is_some() {
                return Err(ModelError::configuration(
                    ErrorOrigin::Key,
                    format!(
                        "'{}' declares a primary key and cannot become a derived type",
                        et.name
                    ),
                ));
            }
        }

        self.data.entity_types[entity_type.index()].base_type = base;

        Ok(())
    }

    pub fn set_change_tracking_strategy(
        &mut self,
        entity_type: EntityTypeId,
        strategy: ChangeTrackingStrategy,
    ) -> Result<(), ModelError> {
        self.data.entity_type(entity_type)?;
        self.data.entity_types[entity_type.index()].change_tracking_strategy = strategy;

        Ok(())
    }

    pub fn set_discriminator_value(
        &mut self,
        entity_type: EntityTypeId,
        value: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.data.entity_type(entity_type)?;
        self.data.entity_types[entity_type.index()].discriminator_value = Some(value.into());

        Ok(())
    }

    //
    // members
    //

    pub fn add_property(
        &mut self,
        entity_type: EntityTypeId,
        config: PropertyConfig,
    ) -> Result<PropertyId, ModelError> {
        self.ensure_member_name_free(entity_type, &config.name)?;

        let shape = self.data.entity_type(entity_type)?.shape;
        let member = self.data.find_member_binding(shape, &config.name)?.cloned();

        let id = PropertyId::new(self.data.properties.len());
        self.data
            .properties
            .push(Property::new(config, entity_type, member));
        self.data.entity_types[entity_type.index()]
            .properties
            .push(id);

        Ok(id)
    }

    pub fn add_navigation(
        &mut self,
        entity_type: EntityTypeId,
        config: NavigationConfig,
    ) -> Result<NavigationId, ModelError> {
        self.ensure_member_name_free(entity_type, &config.name)?;

        let fk = self.data.foreign_key(config.foreign_key)?;
        let side = if config.on_dependent {
            fk.dependent_type
        } else {
            fk.principal_type
        };
        if !self.data.base_chain(entity_type)?.contains(&side) {
            return Err(ModelError::configuration(
                ErrorOrigin::Navigation,
                format!(
                    "navigation '{}' on '{}' does not match the {} side of its foreign key",
                    config.name,
                    self.data.display_name(entity_type)?,
                    if config.on_dependent {
                        "dependent"
                    } else {
                        "principal"
                    },
                ),
            ));
        }
        let collection = !config.on_dependent && !fk.unique;

        let shape = self.data.entity_type(entity_type)?.shape;
        let member = self.data.find_member_binding(shape, &config.name)?.cloned();
        if member.is_none() && !config.shadow {
            return Err(ModelError::no_clr_navigation(
                &config.name,
                &self.data.display_name(entity_type)?,
            ));
        }

        let id = NavigationId::new(self.data.navigations.len());
        self.data.navigations.push(Navigation {
            name: config.name,
            declaring_type: entity_type,
            foreign_key: config.foreign_key,
            on_dependent: config.on_dependent,
            collection,
            member,
            slots: None,
        });
        self.data.entity_types[entity_type.index()]
            .navigations
            .push(id);

        Ok(id)
    }

    /// Add a many-to-many navigation. A missing member binding is an error
    /// unless the config opts into a shadow navigation.
    pub fn add_skip_navigation(
        &mut self,
        entity_type: EntityTypeId,
        config: SkipNavigationConfig,
    ) -> Result<SkipNavigationId, ModelError> {
        self.ensure_member_name_free(entity_type, &config.name)?;
        self.data.entity_type(config.target_type)?;

        let shape = self.data.entity_type(entity_type)?.shape;
        let member = self.data.find_member_binding(shape, &config.name)?.cloned();
        if member.is_none() && !config.shadow {
            return Err(ModelError::no_clr_navigation(
                &config.name,
                &self.data.display_name(entity_type)?,
            ));
        }

        let id = SkipNavigationId::new(self.data.skip_navigations.len());
        self.data.skip_navigations.push(SkipNavigation {
            name: config.name,
            declaring_type: entity_type,
            target_type: config.target_type,
            collection: true,
            member,
            slots: None,
        });
        self.data.entity_types[entity_type.index()]
            .skip_navigations
            .push(id);

        Ok(id)
    }

    pub fn add_service_property(
        &mut self,
        entity_type: EntityTypeId,
        name: impl Into<String>,
    ) -> Result<ServicePropertyId, ModelError> {
        let name = name.into();
        self.ensure_member_name_free(entity_type, &name)?;

        let shape = self.data.entity_type(entity_type)?.shape;
        let member = self.data.find_member_binding(shape, &name)?.cloned();

        let id = ServicePropertyId::new(self.data.service_properties.len());
        self.data.service_properties.push(ServiceProperty {
            name,
            declaring_type: entity_type,
            member,
            slots: None,
        });
        self.data.entity_types[entity_type.index()]
            .service_properties
            .push(id);

        Ok(id)
    }

    //
    // keys
    //

    pub fn add_key(
        &mut self,
        entity_type: EntityTypeId,
        properties: &[PropertyId],
    ) -> Result<KeyId, ModelError> {
        self.ensure_key_properties(entity_type, properties)?;

        if let Some(existing) = self
            .data
            .entity_type(entity_type)?
            .keys
            .iter()
            .copied()
            .find(|k| self.data.keys[k.index()].properties == properties)
        {
            return Ok(existing);
        }

        let id = KeyId::new(self.data.keys.len());
        self.data.keys.push(Key {
            declaring_type: entity_type,
            properties: properties.to_vec(),
        });
        self.data.entity_types[entity_type.index()].keys.push(id);
        for property in properties {
            self.data.properties[property.index()].keys.push(id);
        }

        Ok(id)
    }

    /// Declare the primary key. Only root entity types may declare one.
    pub fn set_primary_key(
        &mut self,
        entity_type: EntityTypeId,
        properties: &[PropertyId],
    ) -> Result<KeyId, ModelError> {
        let et = self.data.entity_type(entity_type)?;
        if !et.is_root() {
            return Err(ModelError::configuration(
                ErrorOrigin::Key,
                format!(
                    "a key cannot be configured on '{}' because it is a derived type; the key must be configured on the root type",
                    et.name
                ),
            ));
        }

        let id = self.add_key(entity_type, properties)?;
        self.data.entity_types[entity_type.index()].primary_key = Some(id);

        Ok(id)
    }

    pub fn add_foreign_key(
        &mut self,
        dependent_type: EntityTypeId,
        properties: &[PropertyId],
        principal_key: KeyId,
        options: ForeignKeyOptions,
    ) -> Result<ForeignKeyId, ModelError> {
        self.ensure_key_properties(dependent_type, properties)?;
        let principal_type = self.data.key(principal_key)?.declaring_type;

        let id = ForeignKeyId::new(self.data.foreign_keys.len());
        self.data.foreign_keys.push(ForeignKey {
            dependent_type,
            properties: properties.to_vec(),
            principal_type,
            principal_key,
            ownership: options.ownership,
            unique: options.unique,
            required: options.required,
        });
        self.data.entity_types[dependent_type.index()]
            .foreign_keys
            .push(id);
        for property in properties {
            self.data.properties[property.index()].foreign_keys.push(id);
        }

        Ok(id)
    }

    pub fn add_index(
        &mut self,
        entity_type: EntityTypeId,
        properties: &[PropertyId],
        unique: bool,
    ) -> Result<IndexId, ModelError> {
        self.ensure_key_properties(entity_type, properties)?;

        let id = IndexId::new(self.data.indexes.len());
        self.data.indexes.push(Index {
            declaring_type: entity_type,
            properties: properties.to_vec(),
            unique,
        });
        self.data.entity_types[entity_type.index()].indexes.push(id);
        for property in properties {
            self.data.properties[property.index()].indexes.push(id);
        }

        Ok(id)
    }

    //
    // stage transitions
    //

    pub(crate) fn set_dependencies(&mut self, dependencies: ModelDependencies) {
        self.data.dependencies = Some(dependencies);
    }

    pub(crate) const fn mark_validated(&mut self) {
        self.data.stage = ModelStage::Validated;
    }

    /// Write a computed layout into the entity type and its members.
    pub(crate) fn apply_layout(&mut self, layout: &CountsLayout) -> Result<(), ModelError> {
        self.data.entity_type(layout.entity_type)?;

        for (member, indexes) in &layout.members {
            let slots = Some(*indexes);
            match *member {
                MemberRef::Property(id) => {
                    self.data.property(id)?;
                    self.data.properties[id.index()].slots = slots;
                }
                MemberRef::Navigation(id) => {
                    self.data.navigation(id)?;
                    self.data.navigations[id.index()].slots = slots;
                }
                MemberRef::SkipNavigation(id) => {
                    self.data.skip_navigation(id)?;
                    self.data.skip_navigations[id.index()].slots = slots;
                }
                MemberRef::ServiceProperty(id) => {
                    self.data.service_property(id)?;
                    self.data.service_properties[id.index()].slots = slots;
                }
            }
        }
        self.data.entity_types[layout.entity_type.index()].counts = Some(layout.counts);

        Ok(())
    }

    /// Assign slots to every entity type, base types first, and freeze.
    pub fn finalize(mut self, policy: &dyn IndexPolicy) -> Result<FrozenModel, ModelError> {
        counts::assign_all_counts(&mut self, policy)?;
        self.data.stage = ModelStage::Finalized;

        Ok(FrozenModel::new(self.data))
    }

    //
    // helpers
    //

    fn push_entity_type(&mut self, entity_type: EntityType) -> EntityTypeId {
        let id = EntityTypeId::new(self.data.entity_types.len());
        self.data.entity_types.push(entity_type);

        id
    }

    fn ensure_entity_name_free(&self, name: &str) -> Result<(), ModelError> {
        if self.data.find_entity_type(name).is_some() {
            return Err(ModelError::configuration(
                ErrorOrigin::EntityType,
                format!("entity type '{name}' is already in the model"),
            ));
        }

        Ok(())
    }

    fn ensure_base_compatible(&self, shape: ShapeId, base: EntityTypeId) -> Result<(), ModelError> {
        let base_shape = self.data.entity_type(base)?.shape;
        if !self.data.shape_is_assignable_from(base_shape, shape)? {
            return Err(ModelError::configuration(
                ErrorOrigin::EntityType,
                format!(
                    "shape '{}' does not derive from '{}'",
                    self.data.shape(shape)?.name,
                    self.data.shape(base_shape)?.name
                ),
            ));
        }

        Ok(())
    }

    // names must be unique across the declaring type and all of its bases
    fn ensure_member_name_free(
        &self,
        entity_type: EntityTypeId,
        name: &str,
    ) -> Result<(), ModelError> {
        for id in self.data.base_chain(entity_type)? {
            if self.data.find_declared_member(id, name)?.is_some() {
                return Err(ModelError::configuration(
                    ErrorOrigin::EntityType,
                    format!(
                        "member '{name}' cannot be added to '{}' because it is already declared on '{}'",
                        self.data.display_name(entity_type)?,
                        self.data.display_name(id)?
                    ),
                ));
            }
        }

        Ok(())
    }

    fn ensure_key_properties(
        &self,
        entity_type: EntityTypeId,
        properties: &[PropertyId],
    ) -> Result<(), ModelError> {
        if properties.is_empty() {
            return Err(ModelError::configuration(
                ErrorOrigin::Key,
                format!(
                    "a key on '{}' must contain at least one property",
                    self.data.display_name(entity_type)?
                ),
            ));
        }
        for &property in properties {
            self.data
                .check_property_belongs_to_type(entity_type, property)?;
        }

        Ok(())
    }
}

impl Deref for MutableModel {
    type Target = ModelData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
