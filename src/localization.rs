//! The `Localization` entry point: load once, translate many times.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::{
    ConfigError,
    LocalizationOptions,
    load_from_workspace,
};
use crate::diagnostics::{
    Diagnostic,
    DiagnosticSink,
};
use crate::dictionary::{
    DictionaryBuilder,
    LocalizationDictionary,
};
use crate::input::{
    SourceError,
    load_localization_tree_async,
};
use crate::lookup::{
    IntoKeyPath,
    Translator,
    VariableMap,
};

/// Callback receiving every diagnostic emitted by a [`Localization`].
pub type Listener = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Hard failures of [`Localization::prepare`].
///
/// Problems inside the translation data are never reported here; they become diagnostics.
#[derive(Error, Debug)]
pub enum LocalizationError {
    /// Options could not be loaded or are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The localization files could not be loaded.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Locale dictionary plus the options it was built with.
///
/// Call [`prepare`](Self::prepare) once, then [`translate`](Self::translate) from anywhere;
/// lookups only read the dictionary. Diagnostics go to the tracing subscriber and to every
/// listener registered with [`subscribe`](Self::subscribe).
#[derive(Clone, Default)]
pub struct Localization {
    /// Options in effect.
    options: LocalizationOptions,
    /// Dictionary built by the last `prepare`.
    dictionary: LocalizationDictionary,
    /// Registered diagnostic listeners.
    listeners: Vec<Listener>,
}

impl Localization {
    /// Unprepared instance with `options`; the dictionary starts empty.
    #[must_use]
    pub fn new(options: LocalizationOptions) -> Self {
        Self { options, dictionary: LocalizationDictionary::new(), listeners: Vec::new() }
    }

    /// Options from `<workspace_root>/.localization.json`, or defaults rooted at
    /// `<workspace_root>/src` when the file doesn't exist.
    ///
    /// # Errors
    /// Unreadable or unparsable options file.
    pub fn from_workspace(workspace_root: &Path) -> Result<Self, LocalizationError> {
        let options = load_from_workspace(workspace_root)?.unwrap_or_else(|| {
            LocalizationOptions {
                localizations_location: workspace_root.join("src"),
                ..LocalizationOptions::default()
            }
        });
        Ok(Self::new(options))
    }

    /// Registers a diagnostic listener.
    pub fn subscribe(&mut self, listener: impl Fn(&Diagnostic) + Send + Sync + 'static) {
        self.listeners.push(Arc::new(listener));
    }

    /// Loads the configured directory and builds the dictionary.
    ///
    /// Replaces any dictionary built before. Invalid locales in the data are reported to
    /// listeners and skipped.
    ///
    /// # Errors
    /// Invalid options, missing directory, unreadable or unparsable files.
    pub async fn prepare(&mut self) -> Result<(), LocalizationError> {
        self.options.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            location = %self.options.localizations_location.display(),
            "Loading localizations"
        );
        let raw = load_localization_tree_async(
            self.options.localizations_location.clone(),
            self.options.convention_prefix.clone(),
        )
        .await?;

        self.prepare_from_tree(&raw);
        Ok(())
    }

    /// Builds the dictionary from an already loaded raw tree.
    pub fn prepare_from_tree(&mut self, raw: &Value) {
        let builder = DictionaryBuilder::new(self.options.use_file_name);
        let mut sink = ListenerSink { listeners: &self.listeners };
        self.dictionary = builder.build(raw, &mut sink);
        tracing::debug!(locales = ?self.available_locales(), "Localizations ready");
    }

    /// Translates `path`, falling back to the default locale when `locale` is `None`.
    ///
    /// Never fails; see [`Translator::translate`].
    pub fn translate(
        &self,
        path: impl IntoKeyPath,
        locale: Option<&str>,
        variables: Option<&VariableMap>,
    ) -> String {
        let mut sink = ListenerSink { listeners: &self.listeners };
        self.translator().translate(path, locale, variables, &mut sink)
    }

    /// Like [`translate`](Self::translate), with diagnostics going to `sink` only.
    pub fn translate_with(
        &self,
        path: impl IntoKeyPath,
        locale: Option<&str>,
        variables: Option<&VariableMap>,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        self.translator().translate(path, locale, variables, sink)
    }

    /// Translator reading this dictionary with the configured default locale and separator.
    #[must_use]
    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.dictionary, &self.options.default_locale)
            .with_key_separator(&self.options.key_separator)
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &LocalizationOptions {
        &self.options
    }

    /// Dictionary built by the last `prepare`.
    #[must_use]
    pub const fn dictionary(&self) -> &LocalizationDictionary {
        &self.dictionary
    }

    /// Loaded locale codes in insertion order.
    #[must_use]
    pub fn available_locales(&self) -> Vec<&str> {
        self.dictionary.locales().collect()
    }
}

impl std::fmt::Debug for Localization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localization")
            .field("options", &self.options)
            .field("dictionary", &self.dictionary)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs diagnostics and fans them out to listeners.
struct ListenerSink<'a> {
    /// Listeners to notify.
    listeners: &'a [Listener],
}

impl DiagnosticSink for ListenerSink<'_> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        for listener in self.listeners {
            listener(&diagnostic);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use googletest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::diagnostics::DiagnosticKind;

    fn collector(localization: &mut Localization) -> Arc<Mutex<Vec<Diagnostic>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        localization.subscribe(move |diagnostic| sink.lock().unwrap().push(diagnostic.clone()));
        seen
    }

    fn options_for(location: &Path) -> LocalizationOptions {
        LocalizationOptions {
            localizations_location: location.to_path_buf(),
            ..LocalizationOptions::default()
        }
    }

    #[tokio::test]
    async fn prepare_loads_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("first.en.local.json"), r#"{"hello": "Hello"}"#).unwrap();
        fs::write(temp_dir.path().join("first.es.local.json"), r#"{"hello": "Hola"}"#).unwrap();
        let mut localization = Localization::new(options_for(temp_dir.path()));

        localization.prepare().await.unwrap();

        assert_eq!(localization.available_locales(), vec!["en", "es"]);
        assert_eq!(localization.translate("first.hello", None, None), "Hello");
        assert_eq!(localization.translate("first.hello", Some("es"), None), "Hola");
    }

    #[tokio::test]
    async fn prepare_fails_for_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut localization = Localization::new(options_for(&temp_dir.path().join("missing")));

        let result = localization.prepare().await;

        assert!(matches!(
            result,
            Err(LocalizationError::Source(SourceError::DirectoryNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn prepare_rejects_invalid_options() {
        let mut localization = Localization::new(LocalizationOptions {
            default_locale: String::new(),
            ..LocalizationOptions::default()
        });

        let result = localization.prepare().await;

        assert!(matches!(
            result,
            Err(LocalizationError::Config(ConfigError::ValidationErrors(_)))
        ));
    }

    #[googletest::test]
    fn listeners_receive_build_and_lookup_diagnostics() {
        let mut localization = Localization::default();
        let seen = collector(&mut localization);

        localization.prepare_from_tree(&json!({
            "first.local": { "en": { "hello": "Hello" }, "nope": {} }
        }));
        let result = localization.translate("hello", Some("en-GB"), None);

        expect_that!(result, eq("Hello"));
        let seen = seen.lock().unwrap();
        expect_that!(
            *seen,
            elements_are![
                all![
                    field!(Diagnostic.kind, eq(&DiagnosticKind::Error)),
                    field!(
                        Diagnostic.message,
                        eq("Invalid locale \"nope\" coming from \"first.local\"")
                    )
                ],
                all![
                    field!(Diagnostic.kind, eq(&DiagnosticKind::Warning)),
                    field!(
                        Diagnostic.message,
                        eq("Missing locale \"en-GB\", using \"en\" instead for \"hello\"")
                    )
                ]
            ]
        );
    }

    #[googletest::test]
    fn translate_with_bypasses_listeners() {
        let mut localization = Localization::default();
        let seen = collector(&mut localization);
        localization.prepare_from_tree(&json!({ "first.en.local": { "hello": "Hello" } }));

        let mut diagnostics = Vec::new();
        let result = localization.translate_with("first.missing", None, None, &mut diagnostics);

        expect_that!(result, eq("missing <first.missing>"));
        expect_that!(diagnostics, len(eq(1)));
        expect_that!(*seen.lock().unwrap(), is_empty());
    }

    #[googletest::test]
    fn from_workspace_reads_options_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"defaultLocale": "es", "localizationsLocation": "locales", "useFileName": false}"#,
        )
        .unwrap();

        let localization = Localization::from_workspace(temp_dir.path()).unwrap();

        expect_that!(localization.options().default_locale, eq("es"));
        expect_that!(localization.options().use_file_name, eq(false));
        expect_that!(
            localization.options().localizations_location,
            eq(&temp_dir.path().join("locales"))
        );
    }

    #[googletest::test]
    fn from_workspace_defaults_to_src() {
        let temp_dir = TempDir::new().unwrap();

        let localization = Localization::from_workspace(temp_dir.path()).unwrap();

        expect_that!(localization.options().default_locale, eq("en"));
        expect_that!(
            localization.options().localizations_location,
            eq(&temp_dir.path().join("src"))
        );
    }

    #[googletest::test]
    fn prepare_from_tree_replaces_previous_dictionary() {
        let mut localization = Localization::default();
        localization.prepare_from_tree(&json!({ "a.en.local": { "hello": "Hello" } }));
        localization.prepare_from_tree(&json!({ "a.es.local": { "hello": "Hola" } }));

        expect_that!(localization.available_locales(), elements_are![eq(&"es")]);
    }

    #[test]
    fn prepare_runs_on_blocking_runtime() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("first.local.json"), r#"{"en": {"hello": "Hello"}}"#)
            .unwrap();
        let mut localization = Localization::new(options_for(temp_dir.path()));

        tokio_test::block_on(localization.prepare()).unwrap();

        assert_eq!(localization.translate("hello", None, None), "Hello");
    }
}
