use derive_more::Display;
use serde::Serialize;

// arena_id
// typed position into one of the ModelData arenas
macro_rules! arena_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
        )]
        #[display("{}#{}", $label, _0)]
        pub struct $name(usize);

        impl $name {
            pub(crate) const fn new(index: usize) -> Self {
                Self(index)
            }

            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(ShapeId, "shape");
arena_id!(EntityTypeId, "entity");
arena_id!(PropertyId, "property");
arena_id!(NavigationId, "navigation");
arena_id!(SkipNavigationId, "skip_navigation");
arena_id!(ServicePropertyId, "service_property");
arena_id!(KeyId, "key");
arena_id!(ForeignKeyId, "foreign_key");
arena_id!(IndexId, "index");
