//! Locale dictionary assembly.
mod builder;
mod locale;
mod tree;

pub use builder::{
    DictionaryBuilder,
    FILE_IDENTITY_SUFFIX,
};
pub use locale::{
    REGION_SEPARATOR,
    is_locale_code,
    language_of,
};
pub use tree::{
    LocaleTree,
    LocalizationDictionary,
    shallow_merge,
};
