//! Structural model validation orchestration and shared helpers.
//!
//! Validators read a configuring model and never mutate it. Errors are
//! aggregated into one `ErrorTree` keyed by entity type; warnings go to the
//! caller's `ValidationLogger` only.

pub mod hierarchy;
pub mod naming;
pub mod relation;


use crate::{
    error::{ErrorTree, ModelError},
    model::{EntityTypeId, ModelData, MutableModel},
    obs::{ValidationCode, ValidationEvent, ValidationLogger},
};

///
/// ModelValidator
///
/// Whole-model check run by the initializer between the two provider hooks.
///

pub trait ModelValidator: Send + Sync {
    fn validate(
        &self,
        model: &MutableModel,
        logger: &dyn ValidationLogger,
    ) -> Result<(), ModelError>;
}

///
/// StructuralValidator
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralValidator;

impl ModelValidator for StructuralValidator {
    fn validate(
        &self,
        model: &MutableModel,
        logger: &dyn ValidationLogger,
    ) -> Result<(), ModelError> {
        validate_model(model, logger).map_err(ModelError::validation)
    }
}

/// Run every structural pass in a fixed order.
pub fn validate_model(model: &ModelData, logger: &dyn ValidationLogger) -> Result<(), ErrorTree> {
    let mut report = Report::new(logger);

    // Phase 1: local rules on names and members.
    naming::validate_names(model, &mut report);

    // Phase 2: inheritance, discriminators, and keys.
    hierarchy::validate_hierarchy(model, &mut report);

    // Phase 3: relationships and ownership.
    relation::validate_relations(model, &mut report);

    report.into_result()
}

///
/// Report
///
/// Collects errors for the tree and forwards every event to the logger.
///

pub struct Report<'a> {
    errors: ErrorTree,
    logger: &'a dyn ValidationLogger,
}

impl<'a> Report<'a> {
    #[must_use]
    pub const fn new(logger: &'a dyn ValidationLogger) -> Self {
        Self {
            errors: ErrorTree::new(),
            logger,
        }
    }

    pub fn error(&mut self, code: ValidationCode, route: &str, message: impl Into<String>) {
        let message = message.into();
        self.logger
            .log(&ValidationEvent::error(code, route, message.clone()));
        self.errors.add_for(route, message);
    }

    pub fn warn(&mut self, code: ValidationCode, route: &str, message: impl Into<String>) {
        self.logger.log(&ValidationEvent::warning(code, route, message));
    }

    /// Record a lookup failure that stopped a pass early.
    pub fn fail(&mut self, route: &str, err: &ModelError) {
        self.errors.add_for(route, err.to_string());
    }

    pub fn into_result(self) -> Result<(), ErrorTree> {
        self.errors.result()
    }
}

// route
// display name for diagnostics, falling back to the raw id
pub(crate) fn route(model: &ModelData, id: EntityTypeId) -> String {
    model
        .display_name(id)
        .unwrap_or_else(|_| id.to_string())
}
