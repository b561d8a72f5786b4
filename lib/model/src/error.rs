use std::fmt;
use std::num::ParseFloatError;
use std::str::ParseBoolError;
use thiserror::Error;

pub type ThinResult<T> = Result<T, ThinError>;

/// The error raised when a value cannot be interpreted, for example a literal with a malformed
/// lexical form or a comparison of incompatible types.
///
/// Filters treat every such error alike, so it carries no reason.
#[derive(Clone, Copy, Debug, Default, Error, PartialEq, Eq)]
pub struct ThinError {}

impl ThinError {
    pub fn expected<T>() -> ThinResult<T> {
        Err(Self {})
    }
}

impl fmt::Display for ThinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the value cannot be interpreted")
    }
}

impl From<ParseBoolError> for ThinError {
    fn from(_: ParseBoolError) -> Self {
        Self {}
    }
}

impl From<ParseFloatError> for ThinError {
    fn from(_: ParseFloatError) -> Self {
        Self {}
    }
}
