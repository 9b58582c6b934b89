//! Dotted-path navigation over locale trees.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::dictionary::LocaleTree;

/// Default separator between key path segments.
pub const DEFAULT_KEY_SEPARATOR: &str = ".";

/// Ordered segments identifying a leaf in a [`LocaleTree`] (`first.name.hello`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TranslationKeyPath {
    /// Path segments, root first.
    segments: Vec<String>,
}

impl TranslationKeyPath {
    /// Splits `path` on `separator`.
    #[must_use]
    pub fn parse(path: &str, separator: &str) -> Self {
        if separator.is_empty() {
            return Self { segments: vec![path.to_string()] };
        }
        Self { segments: path.split(separator).map(str::to_string).collect() }
    }

    /// Path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// `true` for a path without segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments joined with `separator`.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl fmt::Display for TranslationKeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(DEFAULT_KEY_SEPARATOR))
    }
}

/// Anything that can name a translation key path.
///
/// Strings are split on the separator in effect; segment lists are taken as they are.
pub trait IntoKeyPath {
    /// Converts into a path, splitting strings on `separator`.
    fn into_key_path(self, separator: &str) -> TranslationKeyPath;
}

impl IntoKeyPath for TranslationKeyPath {
    fn into_key_path(self, _separator: &str) -> TranslationKeyPath {
        self
    }
}

impl IntoKeyPath for &TranslationKeyPath {
    fn into_key_path(self, _separator: &str) -> TranslationKeyPath {
        self.clone()
    }
}

impl IntoKeyPath for &str {
    fn into_key_path(self, separator: &str) -> TranslationKeyPath {
        TranslationKeyPath::parse(self, separator)
    }
}

impl IntoKeyPath for &String {
    fn into_key_path(self, separator: &str) -> TranslationKeyPath {
        TranslationKeyPath::parse(self, separator)
    }
}

impl IntoKeyPath for Vec<String> {
    fn into_key_path(self, _separator: &str) -> TranslationKeyPath {
        TranslationKeyPath { segments: self }
    }
}

impl IntoKeyPath for &[&str] {
    fn into_key_path(self, _separator: &str) -> TranslationKeyPath {
        TranslationKeyPath { segments: self.iter().map(|s| (*s).to_string()).collect() }
    }
}

impl<const N: usize> IntoKeyPath for [&str; N] {
    fn into_key_path(self, separator: &str) -> TranslationKeyPath {
        self.as_slice().into_key_path(separator)
    }
}

/// The path did not lead anywhere in the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path \"{path}\" not found")]
pub struct PathNotFound {
    /// The attempted path, joined with the navigation separator.
    pub path: String,
}

/// Follows `path` from `tree` and returns the value at its end.
///
/// Every intermediate value has to be an object. The terminal value may be anything;
/// deciding whether it is usable is up to the caller.
///
/// # Errors
/// [`PathNotFound`] when the path is empty or a segment is missing.
pub fn navigate<'a>(
    tree: &'a LocaleTree,
    path: &TranslationKeyPath,
    separator: &str,
) -> Result<&'a Value, PathNotFound> {
    let not_found = || PathNotFound { path: path.join(separator) };

    let Some((last, parents)) = path.segments().split_last() else {
        return Err(not_found());
    };

    let mut node = tree;
    for segment in parents {
        match node.get(segment) {
            Some(Value::Object(child)) => node = child,
            _ => return Err(not_found()),
        }
    }

    node.get(last).ok_or_else(not_found)
}
