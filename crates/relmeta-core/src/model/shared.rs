use crate::{
    error::ModelError,
    model::{FrozenModel, MutableModel},
};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

///
/// Model
///
/// Shared handle over a configured model. Owns a dedicated runtime slot
/// that moves once from empty to populated; after that, reads take no lock.
///

#[derive(Debug)]
pub struct Model {
    source: MutableModel,
    runtime: OnceLock<Arc<FrozenModel>>,
    init_latch: Mutex<()>,
}

impl Model {
    #[must_use]
    pub const fn new(source: MutableModel) -> Self {
        Self {
            source,
            runtime: OnceLock::new(),
            init_latch: Mutex::new(()),
        }
    }

    /// The configured model this handle was built from.
    #[must_use]
    pub const fn source(&self) -> &MutableModel {
        &self.source
    }

    /// The finalized runtime model, if initialization has already succeeded.
    #[must_use]
    pub fn runtime(&self) -> Option<Arc<FrozenModel>> {
        self.runtime.get().cloned()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.runtime.get().is_some()
    }

    /// Return the runtime model, running `factory` at most once to build it.
    /// A failing factory publishes nothing, so the next caller retries.
    pub(crate) fn runtime_or_try_init(
        &self,
        factory: impl FnOnce(&MutableModel) -> Result<FrozenModel, ModelError>,
    ) -> Result<Arc<FrozenModel>, ModelError> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(Arc::clone(runtime));
        }

        // a panicking factory leaves the slot empty, so a poisoned latch is safe to reuse
        let _latch = self
            .init_latch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(runtime) = self.runtime.get() {
            return Ok(Arc::clone(runtime));
        }

        let runtime = Arc::new(factory(&self.source)?);

        Ok(Arc::clone(self.runtime.get_or_init(|| runtime)))
    }
}

impl From<MutableModel> for Model {
    fn from(source: MutableModel) -> Self {
        Self::new(source)
    }
}
