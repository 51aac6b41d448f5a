// Field-level validation errors
//
// Shared between the domain layer (which produces them) and the HTTP layer
// (which renders them as a 422 response).

use serde::Serialize;
use std::fmt;

/// One failing field.
///
/// `loc` is the path to the field, starting with where it came from
/// (`"body"` or `"query"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(source: &str, field: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![source.to_string(), field.to_string()],
            msg: msg.into(),
        }
    }

    /// Error that cannot be attributed to a single field
    pub fn at(source: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![source.to_string()],
            msg: msg.into(),
        }
    }

    /// Name of the failing field, if any
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// Every failing field of one input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.loc.join("."), error.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_are_ok() {
        assert_eq!(ValidationErrors::new().into_result(), Ok(()));
    }

    #[test]
    fn display_joins_locations() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new("body", "price", "must be >= 0"));
        errors.push(FieldError::new("query", "limit", "must be <= 200"));

        assert_eq!(
            errors.to_string(),
            "body.price: must be >= 0; query.limit: must be <= 200"
        );
    }

    #[test]
    fn serializes_as_list() {
        let errors = ValidationErrors::single(FieldError::new("body", "stock", "bad"));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!([{"loc": ["body", "stock"], "msg": "bad"}])
        );
    }
}
