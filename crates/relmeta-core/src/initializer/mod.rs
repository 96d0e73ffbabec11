//! One-shot runtime initialization of a configured model.
//!
//! `ModelRuntimeInitializer::initialize` turns the configured model held by
//! a `Model` handle into its finalized runtime form exactly once. The work
//! happens on a private copy of the configured model; nothing is published
//! unless every step succeeds.

mod config;
mod hooks;


pub use config::InitializerConfig;
pub use hooks::{InitializerHooks, NoopHooks};

use crate::{
    counts::{DefaultIndexPolicy, IndexPolicy},
    error::{ErrorTree, ModelError},
    model::{FrozenModel, Model, ModelDependencies, ModelStage, MutableModel},
    obs::{ValidationEvent, ValidationLogger},
    validate::{ModelValidator, StructuralValidator},
};
use std::{cell::Cell, fmt, sync::Arc};
use tracing::{debug, info_span};

///
/// ModelRuntimeInitializerDependencies
///
/// Collaborators of the initializer. Defaults use the structural validator,
/// no-op hooks, and the default index policy.
///

#[derive(Clone)]
pub struct ModelRuntimeInitializerDependencies {
    pub model_dependencies: ModelDependencies,
    pub validator: Arc<dyn ModelValidator>,
    pub hooks: Arc<dyn InitializerHooks>,
    pub policy: Arc<dyn IndexPolicy>,
    pub config: InitializerConfig,
}

impl ModelRuntimeInitializerDependencies {
    #[must_use]
    pub fn with_model_dependencies(mut self, model_dependencies: ModelDependencies) -> Self {
        self.model_dependencies = model_dependencies;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl ModelValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: impl InitializerHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl IndexPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    #[must_use]
    pub const fn with_config(mut self, config: InitializerConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for ModelRuntimeInitializerDependencies {
    fn default() -> Self {
        Self {
            model_dependencies: ModelDependencies::new(),
            validator: Arc::new(StructuralValidator),
            hooks: Arc::new(NoopHooks),
            policy: Arc::new(DefaultIndexPolicy),
            config: InitializerConfig::default(),
        }
    }
}

impl fmt::Debug for ModelRuntimeInitializerDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRuntimeInitializerDependencies")
            .field("model_dependencies", &self.model_dependencies)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// ModelRuntimeInitializer
///

#[derive(Clone, Debug, Default)]
pub struct ModelRuntimeInitializer {
    dependencies: ModelRuntimeInitializerDependencies,
}

impl ModelRuntimeInitializer {
    #[must_use]
    pub const fn new(dependencies: ModelRuntimeInitializerDependencies) -> Self {
        Self { dependencies }
    }

    #[must_use]
    pub const fn dependencies(&self) -> &ModelRuntimeInitializerDependencies {
        &self.dependencies
    }

    /// Return the finalized runtime model, building it on first use.
    ///
    /// Concurrent callers on the same `Model` wait for a single build and
    /// all receive the same `Arc`. A failed build is not cached; the next
    /// call starts over.
    pub fn initialize(
        &self,
        model: &Model,
        logger: Option<&dyn ValidationLogger>,
    ) -> Result<Arc<FrozenModel>, ModelError> {
        model.runtime_or_try_init(|source| self.build(source, logger))
    }

    fn build(
        &self,
        source: &MutableModel,
        logger: Option<&dyn ValidationLogger>,
    ) -> Result<FrozenModel, ModelError> {
        let deps = &self.dependencies;
        let span = info_span!("initialize_model", entity_types = source.entity_type_count());
        let _enter = span.enter();

        let mut model = source.clone();
        model.set_dependencies(deps.model_dependencies.clone());

        deps.hooks.initialize_model(&mut model, true)?;

        if let Some(logger) = logger
            && deps.config.validate
            && model.stage() == ModelStage::Configuring
        {
            self.validate(&model, logger)?;
            model.mark_validated();
        }

        deps.hooks.initialize_model(&mut model, false)?;

        let frozen = model.finalize(deps.policy.as_ref())?;
        debug!(
            entity_types = frozen.entity_type_count(),
            "model finalized"
        );

        Ok(frozen)
    }

    fn validate(
        &self,
        model: &MutableModel,
        logger: &dyn ValidationLogger,
    ) -> Result<(), ModelError> {
        let counting = WarningCounter::new(logger);

        if let Err(err) = self.dependencies.validator.validate(model, &counting) {
            debug!(error = %err, "model validation failed");
            return Err(err);
        }

        let warnings = counting.warnings.get();
        if warnings > 0 && self.dependencies.config.warnings_as_errors {
            let mut tree = ErrorTree::new();
            crate::err!(tree, "{warnings} validation warning(s) reported and warnings are errors");

            return Err(ModelError::validation(tree));
        }

        Ok(())
    }
}

///
/// WarningCounter
/// Forwards events to the caller's logger while counting warnings.
///

struct WarningCounter<'a> {
    inner: &'a dyn ValidationLogger,
    warnings: Cell<usize>,
}

impl<'a> WarningCounter<'a> {
    const fn new(inner: &'a dyn ValidationLogger) -> Self {
        Self {
            inner,
            warnings: Cell::new(0),
        }
    }
}

impl ValidationLogger for WarningCounter<'_> {
    fn log(&self, event: &ValidationEvent) {
        if event.is_warning() {
            self.warnings.set(self.warnings.get() + 1);
        }
        self.inner.log(event);
    }
}
