//! Localization source loading.
//!
//! Turns a directory of translation files into the raw tree the dictionary builder reads.
//! Every file named `<name>.<prefix>.<json|yaml|yml>` becomes the key `<name>.<prefix>`,
//! nested under one object per sub-directory:
//!
//! ```text
//! locales/first.en.local.json     → { "first.en.local": {...} }
//! locales/nested/third.local.yaml → { "nested": { "third.local": {...} } }
//! ```

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};
use ignore::WalkBuilder;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Errors raised while locating or reading localization sources.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The location does not exist.
    #[error("Localizations directory \"{}\" does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The location exists but is a file.
    #[error("Localizations location \"{}\" is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A matched file could not be read.
    #[error("Failed to read \"{}\": {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A `.json` file is not valid JSON.
    #[error("Failed to parse JSON in \"{}\": {source}", .path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        source: serde_json::Error,
    },

    /// A `.yaml`/`.yml` file is not valid YAML.
    #[error("Failed to parse YAML in \"{}\": {source}", .path.display())]
    Yaml {
        /// File being parsed.
        path: PathBuf,
        /// Parser error.
        source: serde_yaml::Error,
    },

    /// The convention prefix produced an invalid glob.
    #[error("Invalid convention prefix pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// The blocking load task panicked or was cancelled.
    #[error("Localization loading task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl SourceFormat {
    /// Infers the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parses `content` into a JSON value.
    fn parse(self, path: &Path, content: &str) -> Result<Value, SourceError> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|source| SourceError::Json { path: path.to_path_buf(), source }),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|source| SourceError::Yaml { path: path.to_path_buf(), source }),
        }
    }
}

/// Makes sure `location` is an existing directory and returns it canonicalized.
///
/// # Errors
/// [`SourceError::DirectoryNotFound`] or [`SourceError::NotADirectory`].
pub fn check_directory(location: &Path) -> Result<PathBuf, SourceError> {
    let metadata = match std::fs::metadata(location) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::DirectoryNotFound(location.to_path_buf()));
        }
        Err(source) => return Err(SourceError::Io { path: location.to_path_buf(), source }),
    };

    if !metadata.is_dir() {
        return Err(SourceError::NotADirectory(location.to_path_buf()));
    }

    location
        .canonicalize()
        .map_err(|source| SourceError::Io { path: location.to_path_buf(), source })
}

/// File name matcher for `*.<prefix>.{json,yaml,yml}`.
fn convention_matcher(prefix: &str) -> Result<GlobMatcher, SourceError> {
    Ok(Glob::new(&format!("*.{prefix}.{{json,yaml,yml}}"))?.compile_matcher())
}

/// Loads every localization file below `directory` into one raw tree.
///
/// Directory entries are visited sorted by file name, so the same directory always yields
/// the same tree, key order included. Unreadable directory entries are skipped.
///
/// # Errors
/// Missing directory, unreadable file or a file that fails to parse.
pub fn load_localization_tree(directory: &Path, prefix: &str) -> Result<Value, SourceError> {
    let root = check_directory(directory)?;
    let matcher = convention_matcher(prefix)?;
    let mut tree = Map::new();

    for result in WalkBuilder::new(&root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if !matcher.is_match(file_name) {
            continue;
        }
        let (Some(format), Some(key)) =
            (SourceFormat::from_path(path), path.file_stem().and_then(|s| s.to_str()))
        else {
            continue;
        };

        let content = std::fs::read_to_string(path)
            .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
        let value = format.parse(path, &content)?;

        let directories: Vec<String> = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&root).ok())
            .map(|relative| {
                relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect()
            })
            .unwrap_or_default();

        tracing::debug!(path = %path.display(), key, "Loaded localization file");
        if let Some(node) = branch(&mut tree, &directories) {
            node.insert(key.to_string(), value);
        }
    }

    Ok(Value::Object(tree))
}

/// Async wrapper around [`load_localization_tree`] that runs on the blocking pool.
///
/// # Errors
/// Same as [`load_localization_tree`], plus [`SourceError::Join`] if the task panics.
pub async fn load_localization_tree_async(
    directory: PathBuf,
    prefix: String,
) -> Result<Value, SourceError> {
    tokio::task::spawn_blocking(move || load_localization_tree(&directory, &prefix)).await?
}

/// Object reached by following `directories` from `node`, created on the way.
///
/// A file value sitting where a directory object belongs is replaced.
fn branch<'a>(
    mut node: &'a mut Map<String, Value>,
    directories: &[String],
) -> Option<&'a mut Map<String, Value>> {
    for directory in directories {
        let slot = node.entry(directory.clone()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        node = slot.as_object_mut()?;
    }
    Some(node)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[rstest]
    #[case::json("first.en.local.json", Some(SourceFormat::Json))]
    #[case::yaml("first.local.yaml", Some(SourceFormat::Yaml))]
    #[case::yml("first.local.yml", Some(SourceFormat::Yaml))]
    #[case::toml("first.local.toml", None)]
    #[case::no_ext("first", None)]
    fn test_from_path(#[case] path: &str, #[case] expected: Option<SourceFormat>) {
        assert_eq!(SourceFormat::from_path(Path::new(path)), expected);
    }

    #[rstest]
    #[case::json("first.en.local.json", true)]
    #[case::yaml("first.local.yaml", true)]
    #[case::yml("nested.es-MX.local.yml", true)]
    #[case::other_prefix("first.en.remote.json", false)]
    #[case::no_prefix("first.json", false)]
    #[case::unsupported("first.local.toml", false)]
    #[case::prefix_not_last("first.local.en.json", false)]
    fn test_convention_matcher(#[case] file_name: &str, #[case] expected: bool) {
        let matcher = convention_matcher("local").unwrap();

        assert_that!(matcher.is_match(file_name), eq(expected));
    }

    #[googletest::test]
    fn check_directory_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = check_directory(&missing);

        expect_that!(matches!(result, Err(SourceError::DirectoryNotFound(_))), eq(true));
    }

    #[googletest::test]
    fn check_directory_file() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "file.txt", "");

        let result = check_directory(&temp_dir.path().join("file.txt"));

        expect_that!(matches!(result, Err(SourceError::NotADirectory(_))), eq(true));
    }

    #[googletest::test]
    fn load_builds_nested_tree_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "first.en.local.json", r#"{"hello": "Hello"}"#);
        write(temp_dir.path(), "first.es.local.json", r#"{"hello": "Hola"}"#);
        write(temp_dir.path(), "nested/third.local.yaml", "en:\n  light: Light\n");
        write(temp_dir.path(), "README.md", "# not a translation");
        write(temp_dir.path(), "settings.json", "{}");

        let tree = load_localization_tree(temp_dir.path(), "local").unwrap();

        expect_that!(
            tree,
            eq(&json!({
                "first.en.local": { "hello": "Hello" },
                "first.es.local": { "hello": "Hola" },
                "nested": { "third.local": { "en": { "light": "Light" } } }
            }))
        );
        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        expect_that!(
            keys,
            elements_are![eq(&"first.en.local"), eq(&"first.es.local"), eq(&"nested")]
        );
    }

    #[googletest::test]
    fn load_respects_custom_prefix() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "first.en.i18n.json", r#"{"hello": "Hello"}"#);
        write(temp_dir.path(), "first.en.local.json", r#"{"hello": "Ignored"}"#);

        let tree = load_localization_tree(temp_dir.path(), "i18n").unwrap();

        expect_that!(tree, eq(&json!({ "first.en.i18n": { "hello": "Hello" } })));
    }

    #[googletest::test]
    fn load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "broken.en.local.json", "{ invalid json");

        let result = load_localization_tree(temp_dir.path(), "local");

        expect_that!(matches!(result, Err(SourceError::Json { .. })), eq(true));
    }

    #[googletest::test]
    fn load_missing_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_localization_tree(&temp_dir.path().join("missing"), "local");

        expect_that!(matches!(result, Err(SourceError::DirectoryNotFound(_))), eq(true));
    }

    #[tokio::test]
    async fn load_async_matches_sync() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "first.en.local.json", r#"{"hello": "Hello"}"#);

        let tree = load_localization_tree_async(temp_dir.path().to_path_buf(), "local".into())
            .await
            .unwrap();

        assert_eq!(tree, json!({ "first.en.local": { "hello": "Hello" } }));
    }
}
