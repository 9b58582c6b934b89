//! localization-dictionary
//!
//! Locale-keyed translation dictionary built from `*.local.{json,yaml}` files, with
//! dotted-key lookup and locale fallback (`es-AR` → `es` → `es-*` → first locale).
//!
//! ```no_run
//! use localization_dictionary::{Localization, LocalizationOptions};
//! use localization_dictionary::lookup::variables;
//!
//! # async fn run() -> Result<(), localization_dictionary::LocalizationError> {
//! let mut localization = Localization::new(LocalizationOptions {
//!     localizations_location: "./locales".into(),
//!     ..LocalizationOptions::default()
//! });
//! localization.prepare().await?;
//!
//! let vars = variables([("name", "John")]);
//! let greeting = localization.translate("first.name.hello", Some("es-MX"), Some(&vars));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod dictionary;
pub mod input;
pub mod localization;
pub mod lookup;

mod test_utils;

pub use config::LocalizationOptions;
pub use diagnostics::{
    Diagnostic,
    DiagnosticKind,
    DiagnosticSink,
};
pub use dictionary::LocalizationDictionary;
pub use localization::{
    Localization,
    LocalizationError,
};
