//! Assembles a [`LocalizationDictionary`] from a raw configuration tree.

use serde_json::Value;

use super::locale::is_locale_code;
use super::tree::{
    LocaleTree,
    LocalizationDictionary,
};
use crate::diagnostics::{
    Diagnostic,
    DiagnosticCause,
    DiagnosticSink,
};

/// Key suffix that marks a translation-bearing entry (`first.en.local`, `first.local`).
pub const FILE_IDENTITY_SUFFIX: &str = ".local";

/// Separator used to split file-identity keys into segments.
const SEGMENT_SEPARATOR: char = '.';

/// Builds the locale dictionary from file-identity entries.
///
/// Each key ending in [`FILE_IDENTITY_SUFFIX`] is one translation source. Its locale comes
/// either from the key itself (`first.en.local`) or, when the key carries none, from the
/// top-level keys of its value (`first.local` → `{ "en": {...}, "es": {...} }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryBuilder {
    /// Nest file-derived entries under the segments preceding the locale.
    use_file_name: bool,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self { use_file_name: true }
    }
}

impl DictionaryBuilder {
    /// Builder with the given file-name namespacing.
    #[must_use]
    pub const fn new(use_file_name: bool) -> Self {
        Self { use_file_name }
    }

    /// Whether file-named entries are namespaced by their file key.
    #[must_use]
    pub const fn use_file_name(&self) -> bool {
        self.use_file_name
    }

    /// Builds a dictionary from `raw`.
    ///
    /// Matched entries are visited depth first in key order and are terminal: nothing
    /// below a matched key is classified again. Invalid locales are reported to `sink` as
    /// errors and skipped; the build itself never fails.
    pub fn build(&self, raw: &Value, sink: &mut dyn DiagnosticSink) -> LocalizationDictionary {
        let mut dictionary = LocalizationDictionary::new();
        if let Value::Object(root) = raw {
            self.visit(root, &mut dictionary, sink);
        }
        tracing::debug!(locales = dictionary.len(), "Localization dictionary built");
        dictionary
    }

    /// Walks one level of the raw tree.
    fn visit(
        &self,
        node: &serde_json::Map<String, Value>,
        dictionary: &mut LocalizationDictionary,
        sink: &mut dyn DiagnosticSink,
    ) {
        for (key, value) in node {
            if key.ends_with(FILE_IDENTITY_SUFFIX) {
                self.classify(key, value, dictionary, sink);
            } else if let Value::Object(child) = value {
                self.visit(child, dictionary, sink);
            }
        }
    }

    /// Merges one file-identity entry into the dictionary.
    fn classify(
        &self,
        key: &str,
        value: &Value,
        dictionary: &mut LocalizationDictionary,
        sink: &mut dyn DiagnosticSink,
    ) {
        let segments: Vec<&str> = key.split(SEGMENT_SEPARATOR).collect();
        let locale_segment = segments.len().checked_sub(2).and_then(|i| segments.get(i));

        match locale_segment {
            Some(locale) if is_locale_code(locale) => {
                let Some(fragment) = entry_object(key, value, sink) else {
                    return;
                };
                let file_key = segments
                    .get(..segments.len() - 2)
                    .map(|prefix| prefix.join("."))
                    .unwrap_or_default();

                tracing::debug!(
                    key,
                    locale,
                    file_key = %file_key,
                    "Merging file-named locale entry"
                );
                if self.use_file_name {
                    dictionary.merge_into_namespace(locale, &file_key, fragment);
                } else {
                    dictionary.merge_into_locale(locale, fragment);
                }
            }
            _ => Self::classify_inline(key, value, dictionary, sink),
        }
    }

    /// Treats every top-level key of `value` as a candidate locale.
    fn classify_inline(
        key: &str,
        value: &Value,
        dictionary: &mut LocalizationDictionary,
        sink: &mut dyn DiagnosticSink,
    ) {
        let Some(candidates) = entry_object(key, value, sink) else {
            return;
        };

        for (candidate, translations) in candidates {
            if !is_locale_code(candidate) {
                sink.emit(Diagnostic::error(DiagnosticCause::InvalidLocale {
                    locale: candidate.clone(),
                    source_key: key.to_string(),
                }));
                continue;
            }

            let source_key = format!("{key}{SEGMENT_SEPARATOR}{candidate}");
            let Some(fragment) = entry_object(&source_key, translations, sink) else {
                continue;
            };
            tracing::debug!(key, locale = %candidate, "Merging inline locale entry");
            dictionary.merge_into_locale(candidate, fragment);
        }
    }
}

/// Borrows an entry's value as an object, reporting anything else as an error.
fn entry_object<'a>(
    source_key: &str,
    value: &'a Value,
    sink: &mut dyn DiagnosticSink,
) -> Option<&'a LocaleTree> {
    if let Value::Object(object) = value {
        Some(object)
    } else {
        sink.emit(Diagnostic::error(DiagnosticCause::InvalidEntry {
            source_key: source_key.to_string(),
        }));
        None
    }
}
