use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};
use thiserror::Error as ThisError;

///
/// ModelError
///
/// Structured metadata error with a stable classification.
/// Every failure in configuration, validation, and finalization is reported
/// through this type; none of them are retried.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ModelError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl ModelError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a caller-fixable configuration error.
    pub fn configuration(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Configuration, origin, message)
    }

    /// Construct an error for an id that does not belong to the model.
    pub(crate) fn misuse(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Misuse, origin, message)
    }

    /// Construct an internal invariant violation.
    pub(crate) fn invariant(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, origin, message)
    }

    /// Wrap an aggregated validation tree.
    #[must_use]
    pub fn validation(tree: ErrorTree) -> Self {
        Self {
            class: ErrorClass::Validation,
            origin: ErrorOrigin::Validator,
            message: format!("model validation failed: {tree}"),
            detail: Some(ErrorDetail::Validation(tree)),
        }
    }

    pub(crate) fn no_clr_navigation(navigation: &str, entity_type: &str) -> Self {
        Self::configuration(
            ErrorOrigin::Navigation,
            format!(
                "the navigation '{navigation}' cannot be added to the entity type '{entity_type}' because there is no corresponding member on the mapped shape"
            ),
        )
    }

    pub(crate) fn property_does_not_belong(
        property: &str,
        expected_type: &str,
        actual_type: &str,
    ) -> Self {
        Self::configuration(
            ErrorOrigin::Property,
            format!(
                "the property '{property}' belongs to entity type '{expected_type}' but is being used with entity type '{actual_type}'"
            ),
        )
    }

    pub(crate) fn counts_not_computed(entity_type: &str) -> Self {
        Self::invariant(
            ErrorOrigin::EntityType,
            format!("property counts have not been computed for entity type '{entity_type}'"),
        )
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.class, ErrorClass::Validation)
    }

    /// Borrow the validation tree, if this error carries one.
    #[must_use]
    pub const fn validation_tree(&self) -> Option<&ErrorTree> {
        match &self.detail {
            Some(ErrorDetail::Validation(tree)) => Some(tree),
            None => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Validation(ErrorTree),
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Validation,
    Misuse,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Misuse => "misuse",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Model,
    Shape,
    EntityType,
    Property,
    Navigation,
    Key,
    ForeignKey,
    Ownership,
    Counts,
    Initializer,
    Validator,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Model => "model",
            Self::Shape => "shape",
            Self::EntityType => "entity_type",
            Self::Property => "property",
            Self::Navigation => "navigation",
            Self::Key => "key",
            Self::ForeignKey => "foreign_key",
            Self::Ownership => "ownership",
            Self::Counts => "counts",
            Self::Initializer => "initializer",
            Self::Validator => "validator",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorTree
///
/// Route-keyed aggregation of validation messages.
/// Messages at the root have an empty route.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Record a message under a route such as an entity type name.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl Into<String>) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.children.entry(route).or_default().merge(child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, routes joined with `.`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }
        for (route, child) in &self.children {
            let route = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&route, out);
        }
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .flatten()
            .into_iter()
            .map(|(route, message)| {
                if route.is_empty() {
                    message
                } else {
                    format!("{route}: {message}")
                }
            })
            .collect::<Vec<_>>();

        write!(f, "{}", lines.join("; "))
    }
}

/// Push a formatted message onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}
