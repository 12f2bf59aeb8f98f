//! Lazy property container — static keys from memory, dynamic file on demand.
//!
//! Build scripts look properties up through this map. Static keys are served
//! from the cache filled at construction. The first miss reads the per-build
//! dynamic file once; from then on the build can no longer reuse its
//! configuration cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::PropertiesError;
use crate::properties::format::{read_properties, Properties};
use crate::properties::splitter::static_properties_path;

/// Key→value map backed by a static file and a lazily read dynamic file.
#[derive(Debug)]
pub struct LazyPropertyContainer {
    dynamic_path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
    dynamic_read: AtomicBool,
    read_lock: Mutex<()>,
}

impl LazyPropertyContainer {
    /// Load the static half of `dynamic_path` (the file with `suffix`
    /// appended). With `read_all`, the dynamic file is read right away.
    pub fn open(
        dynamic_path: impl Into<PathBuf>,
        suffix: &str,
        read_all: bool,
    ) -> Result<Self, PropertiesError> {
        let dynamic_path = dynamic_path.into();
        let static_path = static_properties_path(&dynamic_path, suffix);
        let static_properties = read_properties(&static_path)?;
        debug!(
            "Loaded {} static properties from {}",
            static_properties.len(),
            static_path.display()
        );

        let container = Self {
            dynamic_path,
            cache: RwLock::new(static_properties.into_iter().collect()),
            dynamic_read: AtomicBool::new(false),
            read_lock: Mutex::new(()),
        };

        if read_all {
            container.read_dynamic()?;
        }
        Ok(container)
    }

    /// Look up `key`. A key missing from the cache triggers the one-time
    /// dynamic read, after which the lookup is retried.
    pub fn get(&self, key: &str) -> Result<Option<String>, PropertiesError> {
        if let Some(value) = self.cache.read().get(key) {
            return Ok(Some(value.clone()));
        }

        if !self.dynamic_read.load(Ordering::Acquire) {
            let _guard = self.read_lock.lock();
            if !self.dynamic_read.load(Ordering::Acquire) {
                self.read_dynamic()?;
            }
        }

        Ok(self.cache.read().get(key).cloned())
    }

    /// Insert into the cache only. The backing files are never written.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.cache.write().insert(key.into(), value.into())
    }

    /// Remove from the cache only.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.cache.write().remove(key)
    }

    /// Whether the dynamic file has been read.
    pub fn dynamic_read(&self) -> bool {
        self.dynamic_read.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Cache membership. Never triggers the dynamic read.
    pub fn contains_key(&self, key: &str) -> bool {
        self.cache.read().contains_key(key)
    }

    /// Cached keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.cache.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Sorted copy of the cache.
    pub fn snapshot(&self) -> Properties {
        self.cache
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn dynamic_path(&self) -> &Path {
        &self.dynamic_path
    }

    /// Merge the dynamic file into the cache and set the flag. The flag is
    /// only set after a successful read, so a failed read is retried.
    fn read_dynamic(&self) -> Result<(), PropertiesError> {
        let dynamic = read_properties(&self.dynamic_path)?;
        info!(
            "Read {} dynamic properties from {}",
            dynamic.len(),
            self.dynamic_path.display()
        );

        let mut cache = self.cache.write();
        for (key, value) in dynamic {
            cache.entry(key).or_insert(value);
        }
        drop(cache);

        self.dynamic_read.store(true, Ordering::Release);
        Ok(())
    }
}
