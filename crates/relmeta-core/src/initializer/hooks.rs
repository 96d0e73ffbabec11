use crate::{error::ModelError, model::MutableModel};

///
/// InitializerHooks
///
/// Provider extension point run on the in-progress model copy, once before
/// validation and once after it. Errors abort initialization.
///

pub trait InitializerHooks: Send + Sync {
    fn initialize_model(
        &self,
        _model: &mut MutableModel,
        _pre_validation: bool,
    ) -> Result<(), ModelError> {
        Ok(())
    }
}

///
/// NoopHooks
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl InitializerHooks for NoopHooks {}
