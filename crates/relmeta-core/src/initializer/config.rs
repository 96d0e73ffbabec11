use serde::{Deserialize, Serialize};

///
/// InitializerConfig
///
/// Runtime initialization switches. Missing fields take their defaults;
/// unknown fields are rejected.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitializerConfig {
    /// Run the model validator when a validation logger is supplied.
    pub validate: bool,

    /// Fail initialization when validation reports any warning.
    pub warnings_as_errors: bool,
}

impl InitializerConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validate: true,
            warnings_as_errors: false,
        }
    }

    #[must_use]
    pub const fn without_validation() -> Self {
        Self {
            validate: false,
            warnings_as_errors: false,
        }
    }

    #[must_use]
    pub const fn strict() -> Self {
        Self {
            validate: true,
            warnings_as_errors: true,
        }
    }
}

impl Default for InitializerConfig {
    fn default() -> Self {
        Self::new()
    }
}
