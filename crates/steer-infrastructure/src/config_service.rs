//! Configuration service implementation.
//!
//! Loads `SteerConfig` from `config.toml` (by default
//! `~/.config/steer/config.toml`) and caches it.

use crate::paths::SteerPaths;
use crate::storage::AtomicTomlFile;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use steer_core::config::SteerConfig;
use steer_core::{Result, SteerError};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Loaded lazily on first access.
    config: Arc<RwLock<Option<SteerConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading the platform default location.
    pub fn new_default() -> Result<Self> {
        let path = SteerPaths::default()
            .config_file()
            .map_err(|e| SteerError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn get_config(&self) -> Result<SteerConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load()?;
        self.store_cached(loaded.clone());
        Ok(loaded)
    }

    /// Like [`ConfigService::get_config`], falling back to defaults on error.
    pub fn get_config_or_default(&self) -> SteerConfig {
        self.get_config().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Using default configuration");
            SteerConfig::default()
        })
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Writes `config` to the file and refreshes the cache.
    pub fn save(&self, config: &SteerConfig) -> Result<()> {
        self.file().save(config)?;
        self.store_cached(config.clone());
        tracing::info!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }

    /// Applies `f` to the file's current contents (or the defaults) under
    /// the file lock, writes the result and refreshes the cache.
    ///
    /// Concurrent updates from other handles or processes are serialized,
    /// so none of them is lost.
    pub fn update<F>(&self, f: F) -> Result<SteerConfig>
    where
        F: FnOnce(&mut SteerConfig),
    {
        let updated = self.file().update(SteerConfig::default(), f)?;
        self.store_cached(updated.clone());
        tracing::info!(path = %self.path.display(), "Configuration updated");
        Ok(updated)
    }

    /// Writes the default configuration unless the file already exists.
    ///
    /// Returns whether a file was created.
    pub fn init_default(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        // A file written by someone else in between is kept as is.
        self.update(|_| {})?;
        Ok(true)
    }

    fn file(&self) -> AtomicTomlFile<SteerConfig> {
        AtomicTomlFile::new(self.path.clone())
    }

    fn store_cached(&self, config: SteerConfig) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(config);
    }

    fn load(&self) -> Result<SteerConfig> {
        match self.file().load()? {
            Some(config) => {
                tracing::debug!(path = %self.path.display(), "Loaded configuration");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %self.path.display(), "No configuration file, using defaults");
                Ok(SteerConfig::default())
            }
        }
    }
}
