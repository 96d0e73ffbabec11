//! ## Crate layout
//! - `core`: two-stage metadata model, slot layout calculation, ownership
//!   resolution, validation, and the runtime initializer.
//! - `migrations`: migration operation records and provider diagnostics.
//!
//! The `prelude` module carries the vocabulary needed to configure a model
//! and read its runtime layout.

pub use relmeta_core as core;
pub use relmeta_migrations as migrations;

use crate::core::{
    error::ModelError,
    initializer::ModelRuntimeInitializer,
    model::{FrozenModel, Model},
    obs::TracingValidationLogger,
};
use std::sync::{Arc, LazyLock};
use tracing::debug;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static DEFAULT_INITIALIZER: LazyLock<ModelRuntimeInitializer> =
    LazyLock::new(ModelRuntimeInitializer::default);

/// Initialize `model` with the default collaborators, sending validation
/// diagnostics to `tracing`.
pub fn initialize(model: &Model) -> Result<Arc<FrozenModel>, ModelError> {
    if let Some(runtime) = model.runtime() {
        return Ok(runtime);
    }
    debug!("initializing model with default collaborators");

    DEFAULT_INITIALIZER.initialize(model, Some(&TracingValidationLogger))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        counts::{DefaultIndexPolicy, IndexPolicy},
        error::{ErrorClass, ErrorOrigin, ModelError},
        initializer::{InitializerConfig, ModelRuntimeInitializer},
        prelude::*,
    };
    pub use crate::migrations::prelude::*;
    pub use serde::{Deserialize, Serialize};
}
