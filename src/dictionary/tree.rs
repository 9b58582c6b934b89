//! Locale trees and the locale-keyed dictionary.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use serde_json::{
    Map,
    Value,
};

/// Nested translations for one locale.
///
/// Values are either further nesting (`Value::Object`) or leaf strings. Key order is the
/// order in which the keys were first merged in.
pub type LocaleTree = Map<String, Value>;

/// Merges `fragment` into `target`, one level deep.
///
/// Every top-level key of `fragment` replaces the key of the same name in `target`.
/// Nested branches are not reconciled: a later fragment that shares a top-level key
/// overwrites the earlier subtree under that key entirely. An overwritten key keeps its
/// original position.
pub fn shallow_merge(target: &mut LocaleTree, fragment: &LocaleTree) {
    for (key, value) in fragment {
        target.insert(key.clone(), value.clone());
    }
}

/// Locale code → [`LocaleTree`], in insertion order.
///
/// Insertion order matters: the prefix and first-available fallbacks pick locales by it.
/// Only [`DictionaryBuilder`](super::DictionaryBuilder) adds entries; nothing removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizationDictionary {
    /// Locale trees keyed by locale code.
    locales: IndexMap<String, LocaleTree>,
}

impl LocalizationDictionary {
    /// Empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree for exactly `locale`.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleTree> {
        self.locales.get(locale)
    }

    /// Stored locale code and tree for exactly `locale`.
    #[must_use]
    pub fn get_key_value(&self, locale: &str) -> Option<(&str, &LocaleTree)> {
        self.locales.get_key_value(locale).map(|(code, tree)| (code.as_str(), tree))
    }

    /// `true` when `locale` has a tree.
    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locale codes in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// `(locale, tree)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleTree)> {
        self.locales.iter().map(|(locale, tree)| (locale.as_str(), tree))
    }

    /// First locale in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &LocaleTree)> {
        self.locales.first().map(|(locale, tree)| (locale.as_str(), tree))
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// `true` when no locale has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Tree for `locale`, created empty on first use.
    pub(crate) fn tree_mut(&mut self, locale: &str) -> &mut LocaleTree {
        match self.locales.entry(locale.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(LocaleTree::new()),
        }
    }

    /// Shallow-merges `fragment` into the root of `locale`.
    pub(crate) fn merge_into_locale(&mut self, locale: &str, fragment: &LocaleTree) {
        shallow_merge(self.tree_mut(locale), fragment);
    }

    /// Shallow-merges `fragment` under `locale` → `namespace`.
    ///
    /// The namespace object is created when missing. A namespace key that currently holds
    /// a leaf string is replaced by an object.
    pub(crate) fn merge_into_namespace(
        &mut self,
        locale: &str,
        namespace: &str,
        fragment: &LocaleTree,
    ) {
        let tree = self.tree_mut(locale);
        let slot = tree
            .entry(namespace.to_string())
            .or_insert_with(|| Value::Object(LocaleTree::new()));
        if !slot.is_object() {
            *slot = Value::Object(LocaleTree::new());
        }
        if let Value::Object(existing) = slot {
            shallow_merge(existing, fragment);
        }
    }
}

impl<'a> IntoIterator for &'a LocalizationDictionary {
    type Item = (&'a String, &'a LocaleTree);
    type IntoIter = indexmap::map::Iter<'a, String, LocaleTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.locales.iter()
    }
}
