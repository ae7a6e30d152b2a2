//! Field-level validators for the labels of a domain name.
//!
//! Every function here takes a single label (the text between two dots),
//! never a whole dotted name. Lengths are measured in bytes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LabelErrorKind;
use crate::registry::TldRegistry;

/// Maximum length of a whole domain name (RFC 1035 section 2.3.4)
pub const DOMAIN_NAME_MAX_SIZE: usize = 253;

/// Maximum length of a single label (RFC 1035 section 2.3.4)
pub const LABEL_MAX_SIZE: usize = 63;

/// Minimum length of a dotted TLD key: the dot plus two characters
pub const TLD_MIN_SIZE: usize = 3;

/// Character class for ASCII host and domain labels
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9-]+$").expect("LABEL_PATTERN: hardcoded regex is invalid")
});

/// Only pure-ASCII labels are held to the character class. Anything else is
/// treated as an opaque internationalized label.
fn check_charset(label: &str) -> Result<(), LabelErrorKind> {
    if label.is_ascii() && !LABEL_PATTERN.is_match(label) {
        return Err(LabelErrorKind::InvalidCharacter);
    }
    Ok(())
}

/// Check a host (subdomain) label, reporting the first rule it breaks.
pub fn check_host(label: &str) -> Result<(), LabelErrorKind> {
    let len = label.len();

    if len == 0 {
        return Err(LabelErrorKind::Empty);
    }
    if len > LABEL_MAX_SIZE {
        return Err(LabelErrorKind::TooLong);
    }
    if label == "-" {
        return Err(LabelErrorKind::LoneHyphen);
    }
    if label.starts_with('-') {
        return Err(LabelErrorKind::LeadingHyphen);
    }
    if label.ends_with('-') {
        return Err(LabelErrorKind::TrailingHyphen);
    }

    check_charset(label)
}

/// Host labels: 1..=63 bytes, no leading/trailing hyphen, `[A-Za-z0-9-]` when ASCII.
pub fn validate_host(label: &str) -> bool {
    check_host(label).is_ok()
}

/// Check the registrable domain label. Stricter than hosts: a single
/// character is rejected.
pub fn check_domain_label(label: &str) -> Result<(), LabelErrorKind> {
    let len = label.len();

    if len == 0 {
        return Err(LabelErrorKind::Empty);
    }
    if len == 1 {
        return Err(LabelErrorKind::TooShort);
    }
    if len > LABEL_MAX_SIZE {
        return Err(LabelErrorKind::TooLong);
    }
    if label.starts_with('-') {
        return Err(LabelErrorKind::LeadingHyphen);
    }
    if label.ends_with('-') {
        return Err(LabelErrorKind::TrailingHyphen);
    }

    check_charset(label)
}

/// Domain labels: 2..=63 bytes, no leading/trailing hyphen, `[A-Za-z0-9-]` when ASCII.
pub fn validate_domain_label(label: &str) -> bool {
    check_domain_label(label).is_ok()
}

/// Build the dotted registry key for a TLD label, or `None` when the key
/// falls outside `[TLD_MIN_SIZE, LABEL_MAX_SIZE]`.
pub fn tld_key(label: &str) -> Option<String> {
    let key = format!(".{}", label);
    if key.len() < TLD_MIN_SIZE || key.len() > LABEL_MAX_SIZE {
        return None;
    }
    Some(key)
}

/// A TLD label is valid when its dotted key is in range and registered.
pub fn validate_tld(label: &str, registry: &TldRegistry) -> bool {
    tld_key(label).is_some_and(|key| registry.contains(&key))
}
