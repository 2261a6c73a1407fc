//! Drill Error Handling
//!
//! Every failure surfaced by the runner, the argument parser, a suite loader or
//! an exercise callable is a [`DrillError`]: what went wrong ([`ErrorKind`]),
//! where it happened (optional [`SourceInfo`]) and how to help
//! ([`DiagnosticInfo`]). The runner never wraps or rewrites an error raised by
//! a callable; it is handed back to the caller exactly as produced.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Text an error can point into, such as one batch case's argument-text or a
/// suite file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type used across the crate.
#[derive(Debug)]
pub struct DrillError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened, when the error points into some text
    pub source_info: Option<SourceInfo>,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All failure modes as a flat enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Construction and lookup
    #[error("callable name must be text, got {found}")]
    InvalidName { found: String },
    #[error("no callable named '{name}' is registered")]
    UnknownCallable { name: String },
    #[error("no batch case with arguments `{key}`")]
    UnknownCase { key: String },

    // Argument-text
    #[error("invalid argument text: {message}")]
    ArgumentSyntax { message: String },
    #[error("positional argument follows named argument")]
    ArgumentOrder,
    #[error("invalid {literal_type} literal '{value}'")]
    InvalidLiteral { literal_type: String, value: String },

    // Raised by callables
    #[error("{func}() expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        func: String,
        expected: String,
        actual: usize,
    },
    #[error("{func}() missing required argument '{param}'")]
    MissingArgument { func: String, param: String },
    #[error("{func}() expected {expected} for '{param}', got {actual}")]
    TypeMismatch {
        func: String,
        param: String,
        expected: String,
        actual: String,
    },
    #[error("{func}(): {reason}")]
    InvalidOperation { func: String, reason: String },
    #[error("{func}() raised: {message}")]
    Raised { func: String, message: String },

    // Suite files
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("malformed suite '{path}': {message}")]
    SuiteFormat { path: String, message: String },
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Runner,
    Syntax,
    Callable,
    Suite,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Runner => "runner",
            Self::Syntax => "syntax",
            Self::Callable => "callable",
            Self::Suite => "suite",
        }
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } | Self::UnknownCallable { .. } | Self::UnknownCase { .. } => {
                ErrorCategory::Runner
            }

            Self::ArgumentSyntax { .. } | Self::ArgumentOrder | Self::InvalidLiteral { .. } => {
                ErrorCategory::Syntax
            }

            Self::ArityMismatch { .. }
            | Self::MissingArgument { .. }
            | Self::TypeMismatch { .. }
            | Self::InvalidOperation { .. }
            | Self::Raised { .. } => ErrorCategory::Callable,

            Self::Io { .. } | Self::SuiteFormat { .. } => ErrorCategory::Suite,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "invalid_name",
            Self::UnknownCallable { .. } => "unknown_callable",
            Self::UnknownCase { .. } => "unknown_case",
            Self::ArgumentSyntax { .. } => "argument_syntax",
            Self::ArgumentOrder => "argument_order",
            Self::InvalidLiteral { .. } => "invalid_literal",
            Self::ArityMismatch { .. } => "arity_mismatch",
            Self::MissingArgument { .. } => "missing_argument",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidOperation { .. } => "invalid_operation",
            Self::Raised { .. } => "raised",
            Self::Io { .. } => "io",
            Self::SuiteFormat { .. } => "suite_format",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::ArgumentSyntax { .. } => "unexpected input",
            Self::ArgumentOrder => "positional argument here",
            Self::InvalidLiteral { .. } => "invalid literal",
            Self::UnknownCase { .. } => "not in batch",
            _ => "here",
        }
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl DrillError {
    pub fn new(kind: ErrorKind) -> Self {
        let error_code = format!("drill::{}::{}", kind.category().as_str(), kind.code_suffix());
        Self {
            kind,
            source_info: None,
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
        }
    }

    /// Attach the text this error points into.
    pub fn with_source(mut self, source: &SourceContext, span: SourceSpan) -> Self {
        self.source_info = Some(SourceInfo {
            source: source.to_named_source(),
            primary_span: span,
        });
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl From<ErrorKind> for DrillError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Context-aware error creation for anything that owns a [`SourceContext`].
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> DrillError;

    fn argument_syntax(&self, message: &str, span: SourceSpan) -> DrillError {
        self.report(
            ErrorKind::ArgumentSyntax {
                message: message.into(),
            },
            span,
        )
    }

    fn invalid_literal(&self, literal_type: &str, value: &str, span: SourceSpan) -> DrillError {
        self.report(
            ErrorKind::InvalidLiteral {
                literal_type: literal_type.into(),
                value: value.into(),
            },
            span,
        )
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> DrillError {
        DrillError::new(kind).with_source(self, span)
    }
}

// ----------------------------------------------------------------------------
// Callable-side constructors
// ----------------------------------------------------------------------------

pub fn arity_mismatch(func: &str, expected: impl ToString, actual: usize) -> DrillError {
    DrillError::new(ErrorKind::ArityMismatch {
        func: func.into(),
        expected: expected.to_string(),
        actual,
    })
}

pub fn missing_argument(func: &str, param: &str) -> DrillError {
    DrillError::new(ErrorKind::MissingArgument {
        func: func.into(),
        param: param.into(),
    })
}

pub fn type_mismatch(func: &str, param: &str, expected: &str, actual: &str) -> DrillError {
    DrillError::new(ErrorKind::TypeMismatch {
        func: func.into(),
        param: param.into(),
        expected: expected.into(),
        actual: actual.into(),
    })
}

pub fn invalid_operation(func: &str, reason: impl Into<String>) -> DrillError {
    DrillError::new(ErrorKind::InvalidOperation {
        func: func.into(),
        reason: reason.into(),
    })
}

/// The error a user-supplied callable returns for its own failures.
pub fn raised(func: &str, message: impl Into<String>) -> DrillError {
    DrillError::new(ErrorKind::Raised {
        func: func.into(),
        message: message.into(),
    })
}

// ============================================================================
// TRAIT IMPLS
// ============================================================================

impl std::error::Error for DrillError {}

impl fmt::Display for DrillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl Diagnostic for DrillError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let info = self.source_info.as_ref()?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_info
            .as_ref()
            .map(|info| &*info.source as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a DrillError with full miette diagnostics to stderr.
pub fn print_error(error: DrillError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

/// Converts a byte range into a miette SourceSpan.
pub fn to_source_span(start: usize, end: usize) -> SourceSpan {
    SourceSpan::from(start..end)
}
