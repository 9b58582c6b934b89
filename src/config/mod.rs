//! Localization options and their loading.
/// Options file loader
mod loader;
/// Option types and validation
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_workspace,
};
pub use types::{
    ConfigError,
    LocalizationOptions,
    ValidationError,
};
