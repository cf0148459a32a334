//! Error adapter for converting MezzanineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`MezzanineError::Validation`] carries every issue found in one pass;
//! each issue is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use mezzanine::{MezzanineError, validate::ValidationIssue};

/// Adapter for a single validation issue.
pub struct IssueAdapter<'a> {
    issue: &'a ValidationIssue,
}

impl<'a> IssueAdapter<'a> {
    pub fn new(issue: &'a ValidationIssue) -> Self {
        Self { issue }
    }
}

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueAdapter")
            .field("issue", &self.issue)
            .finish()
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.issue.message())
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.issue.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.issue
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }
}

/// Adapter for every other [`MezzanineError`] variant.
///
/// A decode error points into the configuration document when its source
/// text is available.
pub struct ErrorAdapter<'a> {
    err: &'a MezzanineError,
    src: Option<&'a str>,
}

impl<'a> ErrorAdapter<'a> {
    pub fn new(err: &'a MezzanineError, src: Option<&'a str>) -> Self {
        Self { err, src }
    }

    fn decode_span(&self) -> Option<(SourceSpan, String)> {
        let (MezzanineError::Decode(err), Some(src)) = (self.err, self.src) else {
            return None;
        };
        let offset = offset_of(src, err.line(), err.column());
        let len = usize::from(offset < src.len());
        Some((SourceSpan::new(offset.into(), len), err.classify_label()))
    }
}

/// Human label for the kind of JSON error.
trait ClassifyLabel {
    fn classify_label(&self) -> String;
}

impl ClassifyLabel for serde_json::Error {
    fn classify_label(&self) -> String {
        match self.classify() {
            serde_json::error::Category::Syntax => "syntax error here".to_string(),
            serde_json::error::Category::Eof => "document ends here".to_string(),
            serde_json::error::Category::Data => "unexpected value here".to_string(),
            serde_json::error::Category::Io => "read failed here".to_string(),
        }
    }
}

/// Byte offset of a 1-based `line`/`column` position, clamped to `src`.
fn offset_of(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.err, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.err.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            MezzanineError::Io(_) => "mezzanine::io",
            MezzanineError::Decode(_) => "mezzanine::decode",
            MezzanineError::Config(_) => "mezzanine::config",
            MezzanineError::Validation(_) => "mezzanine::validation",
            MezzanineError::Store(_) => "mezzanine::store",
            MezzanineError::Export(_) => "mezzanine::export",
            MezzanineError::Quote(_) => "mezzanine::quote",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            MezzanineError::Decode(_) => {
                "loadCapacity must be 250, 350 or 500 and accessory types stairs, railing or pallet_gate"
            }
            MezzanineError::Config(_) => "check the TOML configuration file",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match (self.err, &self.src) {
            (MezzanineError::Decode(_), Some(src)) => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, message) = self.decode_span()?;
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message), span),
        )))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One issue out of a validation failure.
    Issue(IssueAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Issue(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Issue(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`MezzanineError`] into a list of reportable errors.
///
/// For [`MezzanineError::Validation`], this returns one [`Reportable`] for
/// each issue. For other error variants, this returns a single
/// [`Reportable`]; `src` is the configuration document, used to point at
/// decode errors.
pub fn to_reportables<'a>(err: &'a MezzanineError, src: Option<&'a str>) -> Vec<Reportable<'a>> {
    match err {
        MezzanineError::Validation(validation) => validation
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter::new(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter::new(err, src))],
    }
}
