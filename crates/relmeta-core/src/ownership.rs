//! Ownership path resolution.
//!
//! Ownership foreign keys form a forest: each owned entity type points at
//! exactly one owner. These lookups walk from an entity type toward the
//! roots of that forest.

use crate::{
    error::{ErrorOrigin, ModelError},
    model::{EntityTypeId, ForeignKeyId, ModelData, ShapeId},
};
use std::collections::BTreeSet;

impl ModelData {
    /// The ownership foreign key declared directly on `id`.
    pub fn find_declared_ownership(
        &self,
        id: EntityTypeId,
    ) -> Result<Option<ForeignKeyId>, ModelError> {
        for &fk in &self.entity_type(id)?.foreign_keys {
            if self.foreign_key(fk)?.ownership {
                return Ok(Some(fk));
            }
        }

        Ok(None)
    }

    /// The ownership foreign key declared on `id` or inherited from a base type.
    pub fn find_ownership(&self, id: EntityTypeId) -> Result<Option<ForeignKeyId>, ModelError> {
        for et in self.base_chain(id)? {
            if let Some(fk) = self.find_declared_ownership(et)? {
                return Ok(Some(fk));
            }
        }

        Ok(None)
    }

    pub fn is_owned(&self, id: EntityTypeId) -> Result<bool, ModelError> {
        Ok(self.find_ownership(id)?.is_some())
    }

    /// Find `id` itself when its shape is `target`, otherwise the nearest
    /// owner whose shape is assignable from `target`.
    pub fn find_in_ownership_path(
        &self,
        id: EntityTypeId,
        target: ShapeId,
    ) -> Result<Option<EntityTypeId>, ModelError> {
        if self.entity_type(id)?.shape == target {
            return Ok(Some(id));
        }

        let mut visited = BTreeSet::from([id]);
        let mut owner = id;
        loop {
            let Some(ownership) = self.find_ownership(owner)? else {
                return Ok(None);
            };

            owner = self.foreign_key(ownership)?.principal_type;
            if !visited.insert(owner) {
                return Err(self.circular_ownership(id, owner));
            }

            if self.shape_is_assignable_from(self.entity_type(owner)?.shape, target)? {
                return Ok(Some(owner));
            }
        }
    }

    pub fn is_in_ownership_path(
        &self,
        id: EntityTypeId,
        target: ShapeId,
    ) -> Result<bool, ModelError> {
        Ok(self.find_in_ownership_path(id, target)?.is_some())
    }

    /// Owners of `id`, nearest first.
    pub fn ownership_path(&self, id: EntityTypeId) -> Result<Vec<EntityTypeId>, ModelError> {
        let mut path = Vec::new();
        let mut visited = BTreeSet::from([id]);
        let mut owner = id;

        while let Some(ownership) = self.find_ownership(owner)? {
            owner = self.foreign_key(ownership)?.principal_type;
            if !visited.insert(owner) {
                return Err(self.circular_ownership(id, owner));
            }
            path.push(owner);
        }

        Ok(path)
    }

    fn circular_ownership(&self, id: EntityTypeId, owner: EntityTypeId) -> ModelError {
        let name = |et: EntityTypeId| {
            self.display_name(et)
                .unwrap_or_else(|_| et.to_string())
        };

        ModelError::configuration(
            ErrorOrigin::Ownership,
            format!(
                "the ownership path of '{}' is circular at '{}'",
                name(id),
                name(owner)
            ),
        )
    }

    /// Name given to an owned type reached through `ownership_navigation`.
    pub fn owned_name(
        &self,
        owner: EntityTypeId,
        simple_name: &str,
        ownership_navigation: &str,
    ) -> Result<String, ModelError> {
        Ok(owned_name(
            &self.entity_type(owner)?.name,
            simple_name,
            ownership_navigation,
        ))
    }
}

/// `{owner}.{navigation}#{simple}`
#[must_use]
pub fn owned_name(owner: &str, simple_name: &str, ownership_navigation: &str) -> String {
    format!("{owner}.{ownership_navigation}#{simple_name}")
}
