//! Validation logger boundary.
use derive_more::Display;
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

///
/// ValidationLevel
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValidationLevel {
    Warning,
    Error,
}

///
/// ValidationCode
///
/// Stable identifier for each diagnostic the structural validator emits.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ValidationCode {
    CircularInheritance,
    CircularOwnership,
    CollectionMismatch,
    DerivedPrimaryKey,
    DuplicateDiscriminator,
    DuplicateMember,
    ForeignKeyArity,
    InvalidName,
    MissingPrimaryKey,
    MultipleOwnerships,
    RedundantIndex,
    ShadowKeyProperty,
    ShadowNavigation,
    UnknownProperty,
}

///
/// ValidationEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationEvent {
    pub level: ValidationLevel,
    pub code: ValidationCode,

    /// Entity type (and member) the event is about.
    pub route: String,
    pub message: String,
}

impl ValidationEvent {
    #[must_use]
    pub fn warning(code: ValidationCode, route: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            code,
            route: route.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(code: ValidationCode, route: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            code,
            route: route.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.level == ValidationLevel::Warning
    }
}

///
/// ValidationLogger
///

pub trait ValidationLogger {
    fn log(&self, event: &ValidationEvent);
}

///
/// TracingValidationLogger
/// Forwards validation events to `tracing` at warn/error level.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingValidationLogger;

impl ValidationLogger for TracingValidationLogger {
    fn log(&self, event: &ValidationEvent) {
        match event.level {
            ValidationLevel::Warning => {
                warn!(code = %event.code, route = %event.route, "{}", event.message);
            }
            ValidationLevel::Error => {
                error!(code = %event.code, route = %event.route, "{}", event.message);
            }
        }
    }
}

///
/// CollectingValidationLogger
/// Keeps every event in memory, in arrival order.
///

#[derive(Debug, Default)]
pub struct CollectingValidationLogger {
    events: Mutex<Vec<ValidationEvent>>,
}

impl CollectingValidationLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<ValidationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<ValidationEvent> {
        self.events()
            .into_iter()
            .filter(ValidationEvent::is_warning)
            .collect()
    }

    #[must_use]
    pub fn codes(&self) -> Vec<ValidationCode> {
        self.events().into_iter().map(|e| e.code).collect()
    }
}

impl ValidationLogger for CollectingValidationLogger {
    fn log(&self, event: &ValidationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
