//! Observability: validation diagnostics and the sinks that receive them.
//!
//! Validation code MUST NOT write to `tracing` directly; all diagnostics
//! flow through `ValidationEvent` and a `ValidationLogger`.

pub(crate) mod sink;

pub use sink::{
    CollectingValidationLogger, TracingValidationLogger, ValidationCode, ValidationEvent,
    ValidationLevel, ValidationLogger,
};
