use crate::model::{ModelData, ModelStage};
use std::ops::Deref;

///
/// FrozenModel
///
/// Finalized, read-only runtime form of the metadata model. Every entity
/// type carries its `PropertyCounts` and every member its
/// `PropertyIndexes`; neither is ever renumbered.
///

#[derive(Debug)]
pub struct FrozenModel {
    data: ModelData,
}

impl FrozenModel {
    pub(crate) const fn new(data: ModelData) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.data.stage == ModelStage::Finalized
    }
}

impl Deref for FrozenModel {
    type Target = ModelData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
