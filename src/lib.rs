//! Domain Detect - syntactic validation and decomposition of domain names
//!
//! This library splits a domain name into its fields and checks each one:
//! - Host labels (subdomains), left to right
//! - The registrable domain label
//! - One TLD, or a compound pair of TLDs such as `.com.cn`
//!
//! Checks are purely structural: RFC 1035 length limits, label character
//! rules, and membership in a preloaded TLD list. No network lookups are
//! performed.
//!
//! # Example
//!
//! ```rust
//! use domain_detect::detect;
//!
//! let dn = detect("www.foobar.com.cn").unwrap();
//! assert_eq!(dn.hosts(), ["www"]);
//! assert_eq!(dn.domain_label(), "foobar");
//! assert_eq!(dn.top_level_domains(), [".com", ".cn"]);
//!
//! assert!(detect("foobar.foobar").is_err());
//! ```
//!
//! # Custom TLD lists
//!
//! ```rust
//! use domain_detect::{DomainDetector, MemoryTldLoader};
//!
//! let loader = MemoryTldLoader::new().with_tld(".com").with_tld(".internal");
//! let detector = DomainDetector::from_loader(&loader).unwrap();
//!
//! assert!(detector.is_valid("build.corp.internal"));
//! assert!(!detector.is_valid("foobar.net"));
//! ```
//!
//! # Label Rules
//!
//! | Field | Length (bytes) | Hyphens | ASCII characters |
//! |-------|----------------|---------|------------------|
//! | Host | 1..=63 | not first, not last, not alone | `[A-Za-z0-9-]` |
//! | Domain | 2..=63 | not first, not last | `[A-Za-z0-9-]` |
//! | TLD | dotted key 3..=63 | - | registry membership |
//!
//! Non-ASCII labels skip the character class check. The whole name is
//! limited to 253 bytes and may not start with `.`.

pub mod error;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use error::{DomainError, ErrorCategory, LabelErrorKind, Result};
pub use parser::{detect, detect_with, is_valid, DomainDetector};
#[cfg(feature = "bundled")]
pub use registry::BundledTldLoader;
pub use registry::{
    default_registry, FileTldLoader, MemoryTldLoader, NilTldLoader, TldLoader, TldRegistry,
    DEFAULT_TLDS_FILENAME,
};
pub use types::DomainName;
pub use validate::{
    validate_domain_label, validate_host, validate_tld, DOMAIN_NAME_MAX_SIZE, LABEL_MAX_SIZE,
    TLD_MIN_SIZE,
};
