//! Metadata model definitions.
//!
//! The model is held in a single arena (`ModelData`) addressed by typed ids.
//! It exists in two explicit stages:
//! - `MutableModel` is the configuring builder
//! - `FrozenModel` is the finalized, read-only runtime form
//!
//! `Model` is the shared handle that owns a configured model and its
//! one-shot runtime slot.
pub mod data;
pub mod dependencies;
pub mod entity_type;
pub mod frozen;
pub mod id;
pub mod key;
pub mod mutable;
pub mod navigation;
pub mod property;
pub mod shape;
pub mod shared;
pub mod slots;
pub mod tracking;

pub use data::{MemberRef, ModelData};
pub use dependencies::ModelDependencies;
pub use entity_type::EntityType;
pub use frozen::FrozenModel;
pub use id::{
    EntityTypeId, ForeignKeyId, IndexId, KeyId, NavigationId, PropertyId, ServicePropertyId,
    ShapeId, SkipNavigationId,
};
pub use key::{ForeignKey, ForeignKeyOptions, Index, Key};
pub use mutable::MutableModel;
pub use navigation::{
    Navigation, NavigationConfig, ServiceProperty, SkipNavigation, SkipNavigationConfig,
};
pub use property::{Property, PropertyConfig, ValueGenerated};
pub use shape::{MemberBinding, MemberKind, Shape};
pub use shared::Model;
pub use slots::{NOT_APPLICABLE, PropertyCounts, PropertyIndexes};
pub use tracking::ChangeTrackingStrategy;

use serde::Serialize;
use std::fmt;

///
/// ModelStage
///
/// Lifecycle tag carried by the model arena.
///

#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ModelStage {
    #[default]
    Configuring,
    Validated,
    Finalized,
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuring => "configuring",
            Self::Validated => "validated",
            Self::Finalized => "finalized",
        };
        write!(f, "{label}")
    }
}
