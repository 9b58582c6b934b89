//! Locale resolution and translation lookup.

use std::sync::LazyLock;

use serde_json::Value;

use super::interpolate::{
    VariableMap,
    replace_vars,
};
use super::navigator::{
    DEFAULT_KEY_SEPARATOR,
    IntoKeyPath,
    navigate,
};
use crate::dictionary::{
    LocaleTree,
    LocalizationDictionary,
    language_of,
};
use crate::diagnostics::{
    Diagnostic,
    DiagnosticCause,
    DiagnosticSink,
};

/// Tree used when the dictionary has no locales at all.
static EMPTY_TREE: LazyLock<LocaleTree> = LazyLock::new(LocaleTree::new);

/// Which step of the fallback chain produced the locale tree.
///
/// The chain runs `Exact → Language → Prefix → FirstAvailable → Unavailable` and stops at
/// the first step that finds something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleResolution<'a> {
    /// The requested locale exists.
    Exact(&'a str),
    /// The language part of the requested locale exists (`es-AR` → `es`).
    Language(&'a str),
    /// The first locale starting with the requested language (`fr` → `fr-CM`).
    Prefix(&'a str),
    /// The first locale in the dictionary.
    FirstAvailable(&'a str),
    /// The dictionary is empty.
    Unavailable,
}

impl<'a> LocaleResolution<'a> {
    /// Locale whose tree is used, if any.
    #[must_use]
    pub const fn locale(&self) -> Option<&'a str> {
        match self {
            Self::Exact(locale)
            | Self::Language(locale)
            | Self::Prefix(locale)
            | Self::FirstAvailable(locale) => Some(*locale),
            Self::Unavailable => None,
        }
    }

    /// `true` for every step after [`LocaleResolution::Exact`] that still found a locale.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Language(_) | Self::Prefix(_) | Self::FirstAvailable(_))
    }
}

/// Resolves translations from a built [`LocalizationDictionary`].
///
/// Lookups never fail: fallbacks and misses are reported to the sink, and a missing
/// translation renders as `missing <path>`.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    /// Dictionary being read.
    dictionary: &'a LocalizationDictionary,
    /// Locale used when the caller doesn't name one.
    default_locale: &'a str,
    /// Separator for string key paths.
    key_separator: &'a str,
}

impl<'a> Translator<'a> {
    /// Translator over `dictionary` using `.` as the key separator.
    #[must_use]
    pub const fn new(dictionary: &'a LocalizationDictionary, default_locale: &'a str) -> Self {
        Self { dictionary, default_locale, key_separator: DEFAULT_KEY_SEPARATOR }
    }

    /// Uses `separator` instead of `.` between key path segments.
    #[must_use]
    pub const fn with_key_separator(mut self, separator: &'a str) -> Self {
        self.key_separator = separator;
        self
    }

    /// Locale used when a lookup names none.
    #[must_use]
    pub const fn default_locale(&self) -> &'a str {
        self.default_locale
    }

    /// Walks the fallback chain for `locale`.
    #[must_use]
    pub fn resolve_locale(&self, locale: &str) -> (LocaleResolution<'a>, &'a LocaleTree) {
        let dictionary = self.dictionary;

        if let Some((exact, tree)) = dictionary.get_key_value(locale) {
            return (LocaleResolution::Exact(exact), tree);
        }

        let language = language_of(locale);
        if let Some((code, tree)) = dictionary.get_key_value(language) {
            return (LocaleResolution::Language(code), tree);
        }

        if let Some((code, tree)) = dictionary.iter().find(|(code, _)| code.starts_with(language))
        {
            return (LocaleResolution::Prefix(code), tree);
        }

        match dictionary.first() {
            Some((code, tree)) => (LocaleResolution::FirstAvailable(code), tree),
            None => (LocaleResolution::Unavailable, &EMPTY_TREE),
        }
    }

    /// Translates `path` for `locale`, or for the default locale when `locale` is `None`.
    ///
    /// `Some("")` is an explicit locale, not a request for the default. Placeholders are
    /// only substituted when `variables` is given.
    pub fn translate(
        &self,
        path: impl IntoKeyPath,
        locale: Option<&str>,
        variables: Option<&VariableMap>,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        let path = path.into_key_path(self.key_separator);
        let final_locale = locale.unwrap_or(self.default_locale);
        let subject = path.join(self.key_separator);

        let (resolution, tree) = self.resolve_locale(final_locale);
        match resolution {
            LocaleResolution::Exact(_) => {}
            LocaleResolution::Language(substitute)
            | LocaleResolution::Prefix(substitute)
            | LocaleResolution::FirstAvailable(substitute) => {
                sink.emit(Diagnostic::warning(format!(
                    "Missing locale \"{final_locale}\", using \"{substitute}\" instead for \"{subject}\""
                )));
            }
            LocaleResolution::Unavailable => {
                sink.emit(Diagnostic::error(DiagnosticCause::NoFallbackLocale {
                    locale: final_locale.to_string(),
                }));
            }
        }

        match navigate(tree, &path, self.key_separator) {
            Ok(Value::String(found)) => variables
                .map_or_else(|| found.clone(), |vars| replace_vars(found, vars).into_owned()),
            Ok(_) => missing_translation(sink, &subject, final_locale, &subject),
            Err(not_found) => missing_translation(sink, &subject, final_locale, &not_found.path),
        }
    }
}

/// Reports a miss and renders the `missing <path>` sentinel.
fn missing_translation(
    sink: &mut dyn DiagnosticSink,
    subject: &str,
    locale: &str,
    attempted: &str,
) -> String {
    sink.emit(Diagnostic::warning(format!(
        "Missing translation for \"{subject}\" in \"{locale}\""
    )));
    format!("missing <{attempted}>")
}
