use serde::Serialize;

/// Sentinel stored in a slot that does not apply to a member.
pub const NOT_APPLICABLE: i32 = -1;

///
/// PropertyIndexes
///
/// Packed slot positions assigned to one member during finalization.
/// Each slot is either a non-negative position in its array or
/// [`NOT_APPLICABLE`].
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct PropertyIndexes {
    /// Position in the property array, or the navigation array for navigations.
    pub index: i32,
    pub original_value_index: i32,
    pub shadow_index: i32,
    pub relationship_index: i32,
    pub store_generation_index: i32,
}

impl PropertyIndexes {
    /// Indexes for members that occupy no packed array.
    pub const NONE: Self = Self {
        index: NOT_APPLICABLE,
        original_value_index: NOT_APPLICABLE,
        shadow_index: NOT_APPLICABLE,
        relationship_index: NOT_APPLICABLE,
        store_generation_index: NOT_APPLICABLE,
    };

    #[must_use]
    pub const fn new(
        index: i32,
        original_value_index: i32,
        shadow_index: i32,
        relationship_index: i32,
        store_generation_index: i32,
    ) -> Self {
        Self {
            index,
            original_value_index,
            shadow_index,
            relationship_index,
            store_generation_index,
        }
    }

    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        to_slot(self.index)
    }

    #[must_use]
    pub fn original_value_slot(&self) -> Option<usize> {
        to_slot(self.original_value_index)
    }

    #[must_use]
    pub fn shadow_slot(&self) -> Option<usize> {
        to_slot(self.shadow_index)
    }

    #[must_use]
    pub fn relationship_slot(&self) -> Option<usize> {
        to_slot(self.relationship_index)
    }

    #[must_use]
    pub fn store_generation_slot(&self) -> Option<usize> {
        to_slot(self.store_generation_index)
    }
}

fn to_slot(index: i32) -> Option<usize> {
    usize::try_from(index).ok()
}

///
/// PropertyCounts
///
/// Array sizes for one entity type, inherited slots included.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct PropertyCounts {
    pub property_count: usize,
    pub navigation_count: usize,
    pub original_value_count: usize,
    pub shadow_count: usize,
    pub relationship_count: usize,
    pub store_generated_count: usize,
}

impl PropertyCounts {
    #[must_use]
    pub const fn new(
        property_count: usize,
        navigation_count: usize,
        original_value_count: usize,
        shadow_count: usize,
        relationship_count: usize,
        store_generated_count: usize,
    ) -> Self {
        Self {
            property_count,
            navigation_count,
            original_value_count,
            shadow_count,
            relationship_count,
            store_generated_count,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.property_count == 0
            && self.navigation_count == 0
            && self.original_value_count == 0
            && self.shadow_count == 0
            && self.relationship_count == 0
            && self.store_generated_count == 0
    }
}
