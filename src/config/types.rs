use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A single invalid option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "defaultLocale")
    pub field_path: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ValidationError {
    /// バリデーションエラーを作成する
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// 設定の読み込み・検証エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more options failed validation
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The options file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The options file is not valid JSON for [`LocalizationOptions`]
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きリストに整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options read from `.localization.json`.
///
/// Every field is optional in the file; missing ones take the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationOptions {
    /// Locale used when `translate` is called without one.
    pub default_locale: String,

    /// Nest file-named entries under the file name (`first.en.local` → `en.first`).
    pub use_file_name: bool,

    /// Directory the localization files are loaded from.
    pub localizations_location: PathBuf,

    /// Naming convention segment marking localization files (`first.en.<prefix>.json`).
    pub convention_prefix: String,

    /// Separator between segments of a translation key (`first.hello`).
    pub key_separator: String,
}

impl LocalizationOptions {
    /// Checks every option and collects all problems.
    ///
    /// # Errors
    /// - Required field is empty
    /// - Convention prefix contains a path or glob character
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_locale.is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The default locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.localizations_location.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "localizationsLocation",
                "The location cannot be empty. Example: \"./src\"",
            ));
        }

        if self.convention_prefix.is_empty() {
            errors.push(ValidationError::new(
                "conventionPrefix",
                "The prefix cannot be empty. Example: \"local\"",
            ));
        } else if let Some(invalid) =
            self.convention_prefix.chars().find(|c| "/\\*?[]{}!".contains(*c))
        {
            errors.push(ValidationError::new(
                "conventionPrefix",
                format!("Invalid character '{invalid}' in prefix '{}'", self.convention_prefix),
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            use_file_name: true,
            localizations_location: PathBuf::from("./src"),
            convention_prefix: "local".to_string(),
            key_separator: ".".to_string(),
        }
    }
}
