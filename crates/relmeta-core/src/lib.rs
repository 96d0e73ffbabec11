//! Core runtime metadata for relmeta: the two-stage model, slot layout
//! calculation, ownership resolution, structural validation, and the
//! one-shot runtime initializer.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod counts;
pub mod error;
pub mod initializer;
pub mod model;
pub mod obs;
pub mod ownership;
pub mod queries;
pub mod validate;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum length for entity type names.
pub const MAX_ENTITY_NAME_LEN: usize = 256;

///
/// Prelude
///
/// Prelude contains only model vocabulary.
/// No initializer, validator, or policy types are re-exported here.
///

pub mod prelude {
    pub use crate::model::{
        ChangeTrackingStrategy, EntityTypeId, ForeignKeyOptions, FrozenModel, MemberBinding,
        Model, MutableModel, NavigationConfig, PropertyConfig, PropertyCounts, PropertyId,
        PropertyIndexes, ShapeId, SkipNavigationConfig, ValueGenerated,
    };
}
