use once_cell::sync::Lazy;
use regex::Regex;

static LOWER_THEN_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static ACRONYM_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

/// Derive the snake_case wire name kotlinx.serialization would need for a camelCase property.
///
/// `userName` becomes `user_name`, `URLId` becomes `url_id`.
pub fn camel_to_snake(identifier: &str) -> String {
    let separated = LOWER_THEN_UPPER.replace_all(identifier, "${1}_${2}");
    let separated = ACRONYM_BOUNDARY.replace_all(&separated, "${1}_${2}");
    separated.to_lowercase()
}
