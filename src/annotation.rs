use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const SERIALIZABLE_MARKER: &str = "@Serializable";
pub const SERIAL_NAME_PREFIX: &str = "@SerialName(";

static CLASS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)@JsonClass\([^)]*\)\s*$").unwrap());
static NAMED_FIELD_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\s*)@Json\(\s*name\s*=\s*['"]([^'"]+)['"]\s*\)\s*$"#).unwrap()
});
static BARE_FIELD_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*@Json(?:\([^)]*\))?\s*$").unwrap());
static LEGACY_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+com\.squareup\.moshi\.(?:Json|JsonClass)\s*$").unwrap()
});
static FIELD_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)val\s+([A-Za-z_][A-Za-z0-9_]*)\s*:").unwrap());
static PROPERTY_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:val|var)\b").unwrap());

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationMatch {
    /// `@JsonClass(...)` alone on a line
    ClassMarker { indent: String },
    /// `@Json(name = "...")` alone on a line
    NamedFieldMarker { indent: String, declared_name: String },
    /// `@Json` or `@Json(...)` without a name argument
    BareFieldMarker,
    /// `import com.squareup.moshi.Json` or `...JsonClass`
    LegacyImport,
    NoMatch,
}

/// A `val name: Type` declaration following a named field marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub indent: String,
    pub identifier: String,
}

/// Classify a line (terminator excluded). First match wins:
/// class marker, named field marker, bare field marker, legacy import.
pub fn classify(line: &str) -> AnnotationMatch {
    if let Some(caps) = CLASS_MARKER.captures(line) {
        return AnnotationMatch::ClassMarker {
            indent: caps[1].to_string(),
        };
    }

    if let Some(caps) = NAMED_FIELD_MARKER.captures(line) {
        return AnnotationMatch::NamedFieldMarker {
            indent: caps[1].to_string(),
            declared_name: caps[2].to_string(),
        };
    }

    if BARE_FIELD_MARKER.is_match(line) {
        return AnnotationMatch::BareFieldMarker;
    }

    if LEGACY_IMPORT.is_match(line) {
        return AnnotationMatch::LegacyImport;
    }

    AnnotationMatch::NoMatch
}

pub fn parse_field_declaration(line: &str) -> Option<FieldDeclaration> {
    FIELD_DECLARATION.captures(line).map(|caps| FieldDeclaration {
        indent: caps[1].to_string(),
        identifier: caps[2].to_string(),
    })
}

/// True when the line mentions a `val`/`var` keyword, i.e. it is trying to declare a property
pub fn looks_like_declaration(line: &str) -> bool {
    PROPERTY_KEYWORD.is_match(line)
}

pub fn serializable_marker(indent: &str) -> String {
    format!("{}{}", indent, SERIALIZABLE_MARKER)
}

pub fn serial_name_marker(indent: &str, name: &str) -> String {
    format!("{}{}\"{}\")", indent, SERIAL_NAME_PREFIX, name)
}
