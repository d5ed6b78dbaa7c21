use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 7;

const MAX_LENGTH: usize = 32;

/// A validated short code identifier for a shortened URL.
///
/// Generated codes are always [`CODE_LENGTH`] ASCII alphanumeric
/// characters; validation accepts any non-empty alphanumeric string up
/// to 32 characters so that the resolver can be handed trailing code
/// fragments as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are 1-32 ASCII alphanumeric characters.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. the code generator, which always emits valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Builds the full stored short value for this code.
    ///
    /// The stored value bakes the host prefix in (`<base_url>/<code>`);
    /// the resolver later matches on the suffix of this value, not on
    /// the bare code.
    pub fn to_short_value(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.is_empty() || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only ASCII alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
