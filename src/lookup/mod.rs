//! Translation lookup: key paths, placeholder substitution and locale fallback.
mod interpolate;
mod navigator;
mod translator;

pub use interpolate::{
    VariableMap,
    replace_vars,
    variables,
};
pub use navigator::{
    DEFAULT_KEY_SEPARATOR,
    IntoKeyPath,
    PathNotFound,
    TranslationKeyPath,
    navigate,
};
pub use translator::{
    LocaleResolution,
    Translator,
};
