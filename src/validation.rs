use serde::{Deserialize, Serialize};
use std::fmt;

/// A named field marker that could not be validated against its declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    /// 1-based line of the `@Json(name = ...)` marker
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// End of input, or the next line is not a property declaration at all
    MissingFieldDeclaration,
    /// The next line declares a property but not as `val name: Type`
    MalformedFieldDeclaration,
    /// The derived snake_case name disagrees with the declared wire name
    NameMismatch,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: String, line: usize) -> Self {
        Self { kind, message, line }
    }

    /// `found` is the line after the marker, `None` at end of input
    pub fn missing_declaration(found: Option<&str>, line: usize) -> Self {
        let message = match found {
            Some(found) => format!(
                "Encountered @Json(name=...) without following field declaration, got: {}",
                found.trim()
            ),
            None => "Encountered @Json(name=...) without following field declaration".to_string(),
        };
        Self::new(ValidationErrorKind::MissingFieldDeclaration, message, line)
    }

    pub fn malformed_declaration(found: &str, line: usize) -> Self {
        Self::new(
            ValidationErrorKind::MalformedFieldDeclaration,
            format!(
                "Expected a Kotlin 'val' declaration after @Json(name=...), got: {}",
                found.trim()
            ),
            line,
        )
    }

    pub fn name_mismatch(field: &str, expected: &str, declared: &str, line: usize) -> Self {
        Self::new(
            ValidationErrorKind::NameMismatch,
            format!(
                "Field '{}' serializes to '{}', but @Json name is '{}'",
                field, expected, declared
            ),
            line,
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
