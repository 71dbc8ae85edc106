pub mod analysis;
pub mod form;
pub mod profile;
pub mod team;
pub mod testimonial;
pub mod widget;

use thiserror::Error;

/// Returned when a stored or submitted string does not name a known variant.
///
/// Produced by the `FromStr` impls of the model enums, which is how the backend
/// rejects loosely typed rows coming back from the relational store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Rejected owner settings (widget or collection form).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("email verification needs the form to collect an email address")]
    EmailNotCollected,
}
