use thiserror::Error;

use crate::validate::{DOMAIN_NAME_MAX_SIZE, LABEL_MAX_SIZE};

/// Names the label rule that rejected a host or domain label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelErrorKind {
    /// Label has no characters
    Empty,
    /// Label is a single character (domain labels only)
    TooShort,
    /// Label is longer than `LABEL_MAX_SIZE` bytes
    TooLong,
    /// Label is exactly "-"
    LoneHyphen,
    /// Label starts with "-"
    LeadingHyphen,
    /// Label ends with "-"
    TrailingHyphen,
    /// ASCII label contains something outside `[A-Za-z0-9-]`
    InvalidCharacter,
}

impl std::fmt::Display for LabelErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelErrorKind::Empty => f.write_str("empty label"),
            LabelErrorKind::TooShort => f.write_str("label too short"),
            LabelErrorKind::TooLong => write!(f, "label exceeds {} bytes", LABEL_MAX_SIZE),
            LabelErrorKind::LoneHyphen => f.write_str("label is a lone hyphen"),
            LabelErrorKind::LeadingHyphen => f.write_str("label starts with a hyphen"),
            LabelErrorKind::TrailingHyphen => f.write_str("label ends with a hyphen"),
            LabelErrorKind::InvalidCharacter => f.write_str("label contains an invalid character"),
        }
    }
}

/// Coarse failure category, one per class of rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Empty, over-length, leading-dot or single-label input
    Structural,
    /// Trailing label is not a registered TLD
    Tld,
    /// The registrable domain label is malformed
    DomainLabel,
    /// A host (subdomain) label is malformed
    Host,
    /// The TLD list could not be loaded
    DataSource,
}

/// Domain detection error types
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: empty input")]
    Empty,

    #[error(
        "Invalid domain name: {len} bytes exceeds the {max} byte limit",
        max = DOMAIN_NAME_MAX_SIZE
    )]
    TooLong { len: usize },

    #[error("Invalid domain name: starts with '.'")]
    LeadingDot,

    #[error("Invalid domain name: {count} label(s), at least 2 required")]
    TooFewLabels { count: usize },

    #[error("Invalid domain name: unknown top-level domain '{label}' at label {position}")]
    UnknownTld { label: String, position: usize },

    #[error("Invalid domain name: bad domain label '{label}' at label {position}: {kind}")]
    InvalidDomainLabel {
        label: String,
        position: usize,
        kind: LabelErrorKind,
    },

    #[error("Invalid domain name: bad host label '{label}' at label {position}: {kind}")]
    InvalidHost {
        label: String,
        position: usize,
        kind: LabelErrorKind,
    },

    #[error("TLD data source error: {message}")]
    DataSource { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    /// Category of this failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Empty
            | DomainError::TooLong { .. }
            | DomainError::LeadingDot
            | DomainError::TooFewLabels { .. } => ErrorCategory::Structural,
            DomainError::UnknownTld { .. } => ErrorCategory::Tld,
            DomainError::InvalidDomainLabel { .. } => ErrorCategory::DomainLabel,
            DomainError::InvalidHost { .. } => ErrorCategory::Host,
            DomainError::DataSource { .. } | DomainError::IoError(_) => ErrorCategory::DataSource,
        }
    }

    /// True for per-call validation failures, false for load-time failures.
    pub fn is_validation(&self) -> bool {
        self.category() != ErrorCategory::DataSource
    }

    /// The offending label, when the failure is tied to one.
    pub fn label(&self) -> Option<&str> {
        match self {
            DomainError::UnknownTld { label, .. }
            | DomainError::InvalidDomainLabel { label, .. }
            | DomainError::InvalidHost { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }

    /// Zero-based index of the offending label, when there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            DomainError::UnknownTld { position, .. }
            | DomainError::InvalidDomainLabel { position, .. }
            | DomainError::InvalidHost { position, .. } => Some(*position),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
