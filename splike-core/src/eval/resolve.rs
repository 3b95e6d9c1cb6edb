// splike-core - Identifier resolution
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Classification of identifier tokens.
//!
//! | Form | Meaning |
//! |---|---|
//! | `.-name` | field access: `(.-name obj)` |
//! | `.name` | method call: `(.name obj args...)` |
//! | `a/b`, `a/b/c` | host global call: `(Math/floor x)` |
//! | anything else | variable lookup |

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind<'a> {
    Field(&'a str),
    Method(&'a str),
    HostGlobal(Vec<&'a str>),
    Variable(&'a str),
}

/// Classify an identifier, checking the forms in the order listed above.
pub fn classify(name: &str) -> IdentifierKind<'_> {
    if let Some(member) = name.strip_prefix('.') {
        return match member.strip_prefix('-') {
            Some(field) => IdentifierKind::Field(field),
            None => IdentifierKind::Method(member),
        };
    }

    if name.contains('/') {
        let segments: Vec<&str> = name.split('/').collect();
        if segments.len() >= 2 && segments.iter().all(|s| !s.is_empty()) {
            return IdentifierKind::HostGlobal(segments);
        }
    }

    IdentifierKind::Variable(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_and_method() {
        assert_eq!(classify(".-size"), IdentifierKind::Field("size"));
        assert_eq!(classify(".toUpperCase"), IdentifierKind::Method("toUpperCase"));
        // A leading dot always wins over the path form
        assert_eq!(classify(".a/b"), IdentifierKind::Method("a/b"));
    }

    #[test]
    fn test_host_global_paths() {
        assert_eq!(
            classify("Math/floor"),
            IdentifierKind::HostGlobal(vec!["Math", "floor"])
        );
        assert_eq!(
            classify("a/b/c"),
            IdentifierKind::HostGlobal(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn test_division_is_a_variable() {
        assert_eq!(classify("/"), IdentifierKind::Variable("/"));
        assert_eq!(classify("a/"), IdentifierKind::Variable("a/"));
        assert_eq!(classify("/a"), IdentifierKind::Variable("/a"));
        assert_eq!(classify("a//b"), IdentifierKind::Variable("a//b"));
    }

    #[test]
    fn test_plain_variables() {
        assert_eq!(classify("defined?"), IdentifierKind::Variable("defined?"));
        assert_eq!(classify("-"), IdentifierKind::Variable("-"));
    }
}
