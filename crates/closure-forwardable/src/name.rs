//! Method identifiers.
//!
//! Every identifier is normalized on input: a [`Symbol`], a `&str` and a
//! `String` naming the same method all become the same [`MethodName`]. A
//! leading `:` on a string is the symbolic spelling and is dropped, so
//! `":id"`, `"id"` and `sym("id")` are interchangeable.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifiers that can never become forwarding operations.
pub const EXCLUDED_METHODS: [&str; 2] = ["__send__", "__id__"];

/// The symbolic spelling of a method identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub &'static str);

pub const fn sym(name: &'static str) -> Symbol {
    Symbol(name)
}

/// A canonical method identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MethodName(String);

impl MethodName {
    pub fn new(name: impl AsRef<str>) -> Self {
        let raw = name.as_ref();
        let canonical = match raw.strip_prefix(':') {
            Some(rest) if !rest.is_empty() => rest,
            _ => raw,
        };
        MethodName(canonical.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the reserved [`EXCLUDED_METHODS`].
    pub fn is_reserved(&self) -> bool {
        EXCLUDED_METHODS.contains(&self.0.as_str())
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MethodName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MethodName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodName {
    fn from(name: &str) -> Self {
        MethodName::new(name)
    }
}

impl From<String> for MethodName {
    fn from(name: String) -> Self {
        MethodName::new(name)
    }
}

impl From<&String> for MethodName {
    fn from(name: &String) -> Self {
        MethodName::new(name)
    }
}

impl From<Symbol> for MethodName {
    fn from(name: Symbol) -> Self {
        MethodName::new(name.0)
    }
}

impl From<&MethodName> for MethodName {
    fn from(name: &MethodName) -> Self {
        name.clone()
    }
}

impl From<MethodName> for String {
    fn from(name: MethodName) -> Self {
        name.0
    }
}

impl PartialEq<str> for MethodName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MethodName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One identifier or a list of them, as accepted by the bulk installers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodNames(Vec<MethodName>);

impl MethodNames {
    pub fn iter(&self) -> std::slice::Iter<'_, MethodName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for MethodNames {
    type Item = MethodName;
    type IntoIter = std::vec::IntoIter<MethodName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<MethodName> for MethodNames {
    fn from(name: MethodName) -> Self {
        MethodNames(vec![name])
    }
}

impl From<&str> for MethodNames {
    fn from(name: &str) -> Self {
        MethodNames(vec![name.into()])
    }
}

impl From<String> for MethodNames {
    fn from(name: String) -> Self {
        MethodNames(vec![name.into()])
    }
}

impl From<Symbol> for MethodNames {
    fn from(name: Symbol) -> Self {
        MethodNames(vec![name.into()])
    }
}

impl<T: Into<MethodName>, const N: usize> From<[T; N]> for MethodNames {
    fn from(names: [T; N]) -> Self {
        MethodNames(names.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MethodName>> From<Vec<T>> for MethodNames {
    fn from(names: Vec<T>) -> Self {
        MethodNames(names.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MethodName>> FromIterator<T> for MethodNames {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MethodNames(iter.into_iter().map(Into::into).collect())
    }
}

/// Identifiers that installers silently skip.
///
/// Always contains [`EXCLUDED_METHODS`]; more can be added but those two
/// cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<MethodName>);

impl Default for ExclusionSet {
    fn default() -> Self {
        ExclusionSet(EXCLUDED_METHODS.iter().map(|&name| name.into()).collect())
    }
}

impl ExclusionSet {
    pub fn insert(&mut self, name: impl Into<MethodName>) {
        self.0.insert(name.into());
    }

    pub fn contains(&self, name: &MethodName) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodName> {
        self.0.iter()
    }
}

impl<T: Into<MethodName>> Extend<T> for ExclusionSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
