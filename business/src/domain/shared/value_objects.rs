use uuid::Uuid;

/// Generates an opaque, globally unique identifier for a new entity.
///
/// Identifiers are simple (hyphen-free) UUID v4 strings. Callers must treat them as opaque.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Returns the trimmed name when it carries at least one non-whitespace character.
pub fn non_blank(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
