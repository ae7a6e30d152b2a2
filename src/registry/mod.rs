pub mod loader;

use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;

use crate::error::{DomainError, Result};

#[cfg(feature = "bundled")]
pub use loader::BundledTldLoader;
pub use loader::{FileTldLoader, MemoryTldLoader, NilTldLoader, TldLoader, DEFAULT_TLDS_FILENAME};

/// TLD list compiled into the crate, one dotted TLD per line
#[cfg(feature = "bundled")]
const BUNDLED_TLDS: &str = include_str!("../../data/tlds.txt");

#[cfg(feature = "bundled")]
static DEFAULT_REGISTRY: Lazy<TldRegistry> = Lazy::new(TldRegistry::bundled);

#[cfg(not(feature = "bundled"))]
static DEFAULT_REGISTRY: Lazy<TldRegistry> = Lazy::new(TldRegistry::default);

/// Shared read-only registry used by the crate-level `detect` helpers.
///
/// Built from the bundled list on first use. Without the `bundled` feature
/// it is empty and every lookup fails.
pub fn default_registry() -> &'static TldRegistry {
    &DEFAULT_REGISTRY
}

/// Immutable set of known TLDs, each stored with its leading dot (".com").
///
/// Membership is byte-exact; length limits are applied by the validators at
/// lookup time, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TldRegistry {
    tlds: HashSet<String>,
}

impl TldRegistry {
    /// Build a registry from raw lines of a TLD list.
    ///
    /// Trailing line terminators are stripped, blank lines and `#` comments
    /// are skipped, and a bare label gets its leading dot.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tlds = lines
            .into_iter()
            .filter_map(|line| normalize_line(line.as_ref()))
            .collect();
        Self { tlds }
    }

    /// Read a registry from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tlds = HashSet::new();
        for line in reader.lines() {
            if let Some(key) = normalize_line(&line?) {
                tlds.insert(key);
            }
        }
        Ok(Self { tlds })
    }

    /// Load a registry from a line-oriented TLD file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainError::DataSource {
                message: format!("TLDs data file not found: {}", path.display()),
            });
        }

        let file = fs::File::open(path).map_err(|e| DomainError::DataSource {
            message: format!("Cannot open TLDs data file '{}': {}", path.display(), e),
        })?;

        let registry = Self::from_reader(BufReader::new(file)).map_err(|e| {
            DomainError::DataSource {
                message: format!("Cannot read TLDs data file '{}': {}", path.display(), e),
            }
        })?;

        log::debug!("Loaded {} TLDs from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Registry built from the TLD list compiled into the crate.
    #[cfg(feature = "bundled")]
    pub fn bundled() -> Self {
        let registry = Self::from_lines(BUNDLED_TLDS.lines());
        log::debug!("Loaded {} bundled TLDs", registry.len());
        registry
    }

    /// Exact lookup of a dotted key such as ".com".
    pub fn contains(&self, key: &str) -> bool {
        self.tlds.contains(key)
    }

    /// Lookup by bare label ("com"), without the length window of `validate_tld`.
    pub fn contains_label(&self, label: &str) -> bool {
        self.contains(&format!(".{}", label))
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }

    /// Iterate over the dotted keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tlds.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TldRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if line.starts_with('.') {
        Some(line.to_string())
    } else {
        Some(format!(".{}", line))
    }
}
