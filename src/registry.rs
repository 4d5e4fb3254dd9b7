//! Accessor name registry.
//!
//! Maps struct field names to the getter/setter pair that replaces direct
//! access. The CLI populates a single entry from its positional arguments;
//! the library API accepts any number of fields in one rewrite pass.

use std::collections::BTreeMap;

use encap_core::EncapError;

/// The 25 Go keywords. Field and accessor names may not collide with these.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Getter and setter names registered for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPair {
    pub getter: String,
    pub setter: String,
}

/// Field-to-accessor lookup table driving a rewrite pass.
///
/// Keys are field names exactly as they appear in selector expressions.
/// Iteration is sorted so diagnostics derived from the registry come out in
/// a stable order.
#[derive(Debug, Clone, Default)]
pub struct AccessorRegistry {
    entries: BTreeMap<String, AccessorPair>,
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers accessors for `field`.
    ///
    /// All three names must be valid Go identifiers and not keywords.
    /// Registering a field twice replaces its previous pair.
    ///
    /// # Errors
    ///
    /// Returns [`EncapError::InvalidArguments`] when any name fails
    /// validation.
    pub fn insert(&mut self, field: &str, getter: &str, setter: &str) -> Result<(), EncapError> {
        validate_identifier("field name", field)?;
        validate_identifier("getter name", getter)?;
        validate_identifier("setter name", setter)?;
        self.entries.insert(
            field.to_owned(),
            AccessorPair { getter: getter.to_owned(), setter: setter.to_owned() },
        );
        Ok(())
    }

    /// Getter name for `field`, if one is registered.
    pub fn getter(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|pair| pair.getter.as_str())
    }

    /// Setter name for `field`, if one is registered.
    pub fn setter(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|pair| pair.setter.as_str())
    }

    /// Whether accessors are registered for `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Registered field names, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_identifier(role: &str, name: &str) -> Result<(), EncapError> {
    if !is_go_identifier(name) {
        return Err(EncapError::invalid_args(format!(
            "{role} {name:?} is not a Go identifier"
        )));
    }
    if GO_KEYWORDS.contains(&name) {
        return Err(EncapError::invalid_args(format!("{role} {name:?} is a Go keyword")));
    }
    Ok(())
}

/// A letter or underscore followed by letters, digits, and underscores.
/// Unicode letters count, matching Go's identifier grammar.
fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn invalid_message(err: EncapError) -> String {
        match err {
            EncapError::InvalidArguments { message } => message,
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[test]
    fn registers_and_looks_up() {
        let mut registry = AccessorRegistry::new();
        registry.insert("Field", "GetField", "SetField").unwrap();
        assert_eq!(registry.getter("Field"), Some("GetField"));
        assert_eq!(registry.setter("Field"), Some("SetField"));
        assert!(registry.contains("Field"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_field_has_no_accessors() {
        let mut registry = AccessorRegistry::new();
        registry.insert("Field", "GetField", "SetField").unwrap();
        assert_eq!(registry.getter("Other"), None);
        assert_eq!(registry.setter("Other"), None);
        assert!(!registry.contains("Other"));
    }

    #[test]
    fn reinserting_replaces_the_pair() {
        let mut registry = AccessorRegistry::new();
        registry.insert("Field", "GetField", "SetField").unwrap();
        registry.insert("Field", "Field", "PutField").unwrap();
        assert_eq!(registry.getter("Field"), Some("Field"));
        assert_eq!(registry.setter("Field"), Some("PutField"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn fields_are_sorted() {
        let mut registry = AccessorRegistry::new();
        registry.insert("Zeta", "GetZeta", "SetZeta").unwrap();
        registry.insert("Alpha", "GetAlpha", "SetAlpha").unwrap();
        let fields: Vec<_> = registry.fields().collect();
        assert_eq!(fields, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn rejects_field_starting_with_digit() {
        let mut registry = AccessorRegistry::new();
        let err = registry.insert("1bad", "GetField", "SetField").unwrap_err();
        assert_eq!(invalid_message(err), "field name \"1bad\" is not a Go identifier");
    }

    #[test]
    fn rejects_empty_names() {
        let mut registry = AccessorRegistry::new();
        let err = registry.insert("Field", "", "SetField").unwrap_err();
        assert_eq!(invalid_message(err), "getter name \"\" is not a Go identifier");
    }

    #[test]
    fn rejects_interior_punctuation() {
        let mut registry = AccessorRegistry::new();
        let err = registry.insert("Field", "GetField", "Set-Field").unwrap_err();
        assert_eq!(invalid_message(err), "setter name \"Set-Field\" is not a Go identifier");
    }

    #[test]
    fn rejects_keywords() {
        let mut registry = AccessorRegistry::new();
        let err = registry.insert("type", "GetType", "SetType").unwrap_err();
        assert_eq!(invalid_message(err), "field name \"type\" is a Go keyword");
    }

    #[test]
    fn unicode_letters_are_identifiers() {
        let mut registry = AccessorRegistry::new();
        registry.insert("字段", "Get字段", "Set字段").unwrap();
        assert_eq!(registry.getter("字段"), Some("Get字段"));
    }

    #[test]
    fn underscore_prefix_is_valid() {
        let mut registry = AccessorRegistry::new();
        registry.insert("_hidden", "get_hidden", "set_hidden").unwrap();
        assert_eq!(registry.setter("_hidden"), Some("set_hidden"));
    }

    #[test]
    fn keyword_error_maps_to_invalid_arguments_code() {
        let mut registry = AccessorRegistry::new();
        let err = registry.insert("Field", "go", "SetField").unwrap_err();
        assert_eq!(err.error_code().code(), 2);
    }
}
