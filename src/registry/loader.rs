use std::path::{Path, PathBuf};

use crate::error::{DomainError, Result};

use super::TldRegistry;

/// Logger callback type for logging TLD list loading
type LoggerCallback = Box<dyn Fn(&str) + Send + Sync>;

/// File name looked up when only a data directory is configured
pub const DEFAULT_TLDS_FILENAME: &str = "tlds.txt";

/// Trait for loading a TLD registry from some source
pub trait TldLoader: Send + Sync {
    /// Build the registry. Called once at startup; failures are fatal to
    /// initialization.
    fn load(&self) -> Result<TldRegistry>;
}

/// File-based TldLoader
pub struct FileTldLoader {
    path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    logger: Option<LoggerCallback>,
}

impl FileTldLoader {
    /// Create a new FileTldLoader
    pub fn new() -> Self {
        Self {
            path: None,
            data_dir: None,
            logger: None,
        }
    }

    /// Set the TLD file path
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set data directory, used with `DEFAULT_TLDS_FILENAME` when no path is set
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set logger
    pub fn with_logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.logger = Some(Box::new(logger));
        self
    }

    fn log(&self, msg: &str) {
        if let Some(ref logger) = self.logger {
            logger(msg);
        }
    }

    /// Resolved TLD file path (explicit path wins over data directory)
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.path {
            return Some(path.clone());
        }
        self.data_dir.as_ref().map(|dir| dir.join(DEFAULT_TLDS_FILENAME))
    }
}

impl Default for FileTldLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TldLoader for FileTldLoader {
    fn load(&self) -> Result<TldRegistry> {
        let path = self.resolved_path().ok_or_else(|| DomainError::DataSource {
            message: "TLDs data file not configured".to_string(),
        })?;

        self.log(&format!("Loading TLDs from {}", path.display()));
        match TldRegistry::load(&path) {
            Ok(registry) => {
                self.log(&format!(
                    "Loaded {} TLDs from {}",
                    registry.len(),
                    path.display()
                ));
                Ok(registry)
            }
            Err(e) => {
                self.log(&format!("Failed to load TLDs: {}", e));
                log::warn!("Failed to load TLDs: {}", e);
                Err(e)
            }
        }
    }
}

/// TldLoader for the list compiled into the crate
#[cfg(feature = "bundled")]
pub struct BundledTldLoader;

#[cfg(feature = "bundled")]
impl TldLoader for BundledTldLoader {
    fn load(&self) -> Result<TldRegistry> {
        Ok(TldRegistry::bundled())
    }
}

/// Nil TldLoader - returns an error for every load
pub struct NilTldLoader;

impl TldLoader for NilTldLoader {
    fn load(&self) -> Result<TldRegistry> {
        Err(DomainError::DataSource {
            message: "TLD list not available".to_string(),
        })
    }
}

/// In-memory TldLoader for testing
pub struct MemoryTldLoader {
    entries: Vec<String>,
}

impl MemoryTldLoader {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add_tld(&mut self, tld: &str) {
        self.entries.push(tld.to_string());
    }

    pub fn with_tld(mut self, tld: &str) -> Self {
        self.add_tld(tld);
        self
    }
}

impl Default for MemoryTldLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TldLoader for MemoryTldLoader {
    fn load(&self) -> Result<TldRegistry> {
        Ok(TldRegistry::from_lines(&self.entries))
    }
}
