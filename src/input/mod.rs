//! Localization source inputs.
pub mod source;

pub use source::{
    SourceError,
    SourceFormat,
    check_directory,
    load_localization_tree,
    load_localization_tree_async,
};
