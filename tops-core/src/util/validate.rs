use std::fmt;
use thiserror::Error;

/// Checks a raw request parameter value.
pub type Checker = fn(&str) -> Result<(), String>;

pub fn is_int(value: &str) -> Result<(), String> {
    value
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| "must be an integer".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

/// All violations found while validating a single object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present means `Some`, even for empty values.
    pub fn require<T>(mut self, field: &'static str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.0.push(FieldError {
                field,
                message: "is required",
            });
        }
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Malformed key map passed to `Identifier::set_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("bad key: missing '{0}'")]
    Missing(&'static str),
    #[error("bad key: '{0}' has the wrong type")]
    WrongType(&'static str),
}
