//! Structured diagnostics emitted while building and querying the dictionary.
//!
//! Nothing here is fatal. Warnings mean a lookup degraded (fallback locale, missing
//! translation); errors mean source data was rejected or no locale was available at all.
//! Diagnostics are handed to a [`DiagnosticSink`] chosen by the caller.

use serde::Serialize;
use thiserror::Error;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// A lookup degraded but still produced a value
    Warning,
    /// Data was rejected or no locale was available
    Error,
}

/// Underlying cause carried by error diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DiagnosticCause {
    /// An inline-keyed entry has a top-level key that is not a locale code.
    #[error("Invalid locale \"{locale}\" coming from \"{source_key}\"")]
    InvalidLocale {
        /// Rejected candidate.
        locale: String,
        /// Entry key it was found under.
        source_key: String,
    },

    /// A translation entry whose value is not an object.
    #[error("Invalid localization entry \"{source_key}\", expected an object")]
    InvalidEntry {
        /// Key of the rejected entry.
        source_key: String,
    },

    /// The dictionary is empty, so no locale can stand in for the requested one.
    #[error("Missing locale <{locale}> and no fallback found for it")]
    NoFallbackLocale {
        /// Locale that was requested.
        locale: String,
    },
}

/// A single warning or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity.
    pub kind: DiagnosticKind,
    /// Human-readable text.
    pub message: String,
    /// Set for errors.
    pub cause: Option<DiagnosticCause>,
}

impl Diagnostic {
    /// Warning with no structured cause.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Warning, message: message.into(), cause: None }
    }

    /// Error diagnostic whose message is the cause's display text.
    #[must_use]
    pub fn error(cause: DiagnosticCause) -> Self {
        Self { kind: DiagnosticKind::Error, message: cause.to_string(), cause: Some(cause) }
    }

    /// `true` for warnings.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.kind == DiagnosticKind::Warning
    }

    /// `true` for errors.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Writes the diagnostic to the tracing subscriber at the matching level.
    pub fn log(&self) {
        match self.kind {
            DiagnosticKind::Warning => tracing::warn!("{}", self.message),
            DiagnosticKind::Error => tracing::error!(cause = ?self.cause, "{}", self.message),
        }
    }
}

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    /// Takes ownership of one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in emission order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs every diagnostic through `tracing` and discards it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
    }
}

/// Adapts a closure into a [`DiagnosticSink`].
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(
    /// Callback receiving each diagnostic.
    pub F,
);

impl<F> DiagnosticSink for FnSink<F>
where
    F: FnMut(Diagnostic),
{
    fn emit(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic);
    }
}
