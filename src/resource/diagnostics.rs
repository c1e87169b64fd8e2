//! Host-visible diagnostics.

use std::fmt;

use crate::{Error, ErrorCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A labeled message surfaced to the host instead of a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub category: Option<ErrorCategory>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            category: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            category: None,
        }
    }

    fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = Some(category);
        self
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        let diagnostic = match err {
            Error::UnsupportedOperation { reason, .. } => {
                Diagnostic::error("Refresh Error", reason.clone())
            }
            Error::Configuration(message) => {
                Diagnostic::error("Configuration Error", message.clone())
            }
            Error::Cancelled => Diagnostic::error("Cancelled", err.to_string()),
            Error::Io(_) => Diagnostic::error("State Error", err.to_string()),
            _ => Diagnostic::error("Client Error", err.to_string()),
        };
        diagnostic.with_category(err.category())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// Ordered collection of diagnostics for one host request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, err: &Error) {
        self.push(Diagnostic::from(err));
    }

    pub fn append(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Collect the error of a host operation, if any.
    pub fn from_result<T>(result: &crate::Result<T>) -> Self {
        let mut diagnostics = Self::new();
        if let Err(e) = result {
            diagnostics.add_error(e);
        }
        diagnostics
    }
}

impl From<&Error> for Diagnostics {
    fn from(err: &Error) -> Self {
        Self(vec![Diagnostic::from(err)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_diagnostic() {
        let err = Error::unsupported("create", "Refresh Token cannot be created only imported.");
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.summary, "Refresh Error");
        assert_eq!(
            diagnostic.detail,
            "Refresh Token cannot be created only imported."
        );
        assert_eq!(diagnostic.category, Some(ErrorCategory::Unsupported));
    }

    #[test]
    fn test_rotation_diagnostic() {
        let err = Error::rotation(Error::RemoteApi("invalid_auth".into()));
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.summary, "Client Error");
        assert_eq!(
            diagnostic.detail,
            "Unable to rotate token, got error: invalid_auth"
        );
        assert_eq!(diagnostic.category, Some(ErrorCategory::Remote));
        assert_eq!(
            diagnostic.to_string(),
            "Client Error: Unable to rotate token, got error: invalid_auth"
        );
    }

    #[test]
    fn test_diagnostics_collection() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_error());

        diagnostics.push(Diagnostic::warning("Heads up", "nothing broke"));
        assert!(!diagnostics.has_error());

        diagnostics.append(Diagnostics::from(&Error::Cancelled));
        assert!(diagnostics.has_error());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_from_result() {
        assert!(Diagnostics::from_result(&Ok::<_, Error>(())).is_empty());
        let failed: crate::Result<()> = Err(Error::config("bad plan"));
        let diagnostics = Diagnostics::from_result(&failed);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.summary.as_str()),
            Some("Configuration Error")
        );
    }
}
