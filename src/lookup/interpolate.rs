//! `{{name}}` placeholder substitution.

use std::borrow::Cow;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{
    Captures,
    Regex,
};

/// Variable name → substitution value.
pub type VariableMap = IndexMap<String, String>;

/// Matches `{{name}}`, tolerating inner whitespace (`{{ name }}`).
static PLACEHOLDER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w.\-]+)\s*\}\}")
        .inspect_err(|e| tracing::error!("Failed to compile placeholder pattern: {e}"))
        .ok()
});

/// Builds a [`VariableMap`] from `(name, value)` pairs.
///
/// # Examples
/// ```
/// use localization_dictionary::lookup::variables;
///
/// let vars = variables([("name", "John"), ("emoji", "👋")]);
/// assert_eq!(vars.get("name").map(String::as_str), Some("John"));
/// ```
pub fn variables<I, K, V>(pairs: I) -> VariableMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    pairs.into_iter().map(|(name, value)| (name.into(), value.to_string())).collect()
}

/// Replaces every `{{name}}` in `template` with `vars[name]`.
///
/// Placeholders naming a variable that is not in `vars` are left untouched.
///
/// # Examples
/// ```
/// use localization_dictionary::lookup::{replace_vars, variables};
///
/// let vars = variables([("name", "John"), ("emoji", "👋")]);
/// assert_eq!(replace_vars("Hello {{name}} {{emoji}}", &vars), "Hello John 👋");
/// assert_eq!(replace_vars("Hello {{other}}", &vars), "Hello {{other}}");
/// ```
#[must_use]
pub fn replace_vars<'a>(template: &'a str, vars: &VariableMap) -> Cow<'a, str> {
    let Some(pattern) = PLACEHOLDER.as_ref() else {
        return Cow::Borrowed(template);
    };

    pattern.replace_all(template, |caps: &Captures<'_>| {
        let name = caps.get(1).map_or("", |m| m.as_str());
        vars.get(name).map_or_else(
            || caps.get(0).map_or_else(String::new, |m| m.as_str().to_string()),
            Clone::clone,
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::single("Hello {{name}}", "Hello John")]
    #[case::multiple("Hello {{name}} {{emoji}}", "Hello John 👋")]
    #[case::repeated("{{name}}, {{name}}!", "John, John!")]
    #[case::whitespace("Hello {{ name }}", "Hello John")]
    #[case::unknown("Hello {{nobody}}", "Hello {{nobody}}")]
    #[case::no_placeholders("Hello", "Hello")]
    #[case::single_braces("Hello {name}", "Hello {name}")]
    #[case::unclosed("Hello {{name", "Hello {{name")]
    fn test_replace_vars(#[case] template: &str, #[case] expected: &str) {
        let vars = variables([("name", "John"), ("emoji", "👋")]);

        assert_that!(replace_vars(template, &vars).as_ref(), eq(expected));
    }

    #[googletest::test]
    fn variables_accepts_non_string_values() {
        let vars = variables([("count", 3), ("total", 10)]);

        expect_that!(replace_vars("{{count}} of {{total}}", &vars).as_ref(), eq("3 of 10"));
    }

    #[googletest::test]
    fn empty_map_leaves_template_untouched() {
        let vars = VariableMap::new();

        expect_that!(
            replace_vars("Hello {{name}}", &vars).as_ref(),
            eq("Hello {{name}}")
        );
    }
}
