//! Persistent configuration store with change notification.
//!
//! A [`ConfigurationStore`] owns the current [`Configuration`], writes every
//! change through to a [`StorageBackend`] as JSON and notifies subscribed
//! listeners. Changes made by another process sharing the backend are fed in
//! through [`ConfigurationStore::apply_external_change`].

mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use std::{
    fmt::{self, Display},
    io,
};

use indexmap::IndexMap;
use log::{debug, error, info};
use thiserror::Error;

use mezzanine_core::model::Configuration;

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "mezzanine-config";

/// Errors raised while persisting a configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write key `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where a change to the stored configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Made through this store.
    Local,
    /// Written to the backend by someone else.
    External,
}

impl Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Handle returned by [`ConfigurationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Configuration, ChangeSource)>;

/// The current configuration, persisted under a single key.
pub struct ConfigurationStore<B> {
    backend: B,
    key: String,
    initial: Configuration,
    current: Configuration,
    listeners: IndexMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl<B: StorageBackend> ConfigurationStore<B> {
    /// Open the store, loading whatever `backend` holds under `key`.
    ///
    /// Falls back to `initial` when nothing is stored, or when the stored
    /// value cannot be read or decoded. Failures are logged, not returned.
    /// `initial` is also the value [`reset`](Self::reset) restores.
    pub fn open(backend: B, key: impl Into<String>, initial: Configuration) -> Self {
        let key = key.into();

        let current = match backend.read(&key) {
            Ok(Some(stored)) => match serde_json::from_str(&stored) {
                Ok(config) => {
                    debug!(key; "Loaded stored configuration");
                    config
                }
                Err(err) => {
                    error!(key, err:%; "Stored configuration is invalid, using initial value");
                    initial.clone()
                }
            },
            Ok(None) => {
                debug!(key; "No stored configuration, using initial value");
                initial.clone()
            }
            Err(err) => {
                error!(key, err:%; "Failed to read stored configuration, using initial value");
                initial.clone()
            }
        };

        Self {
            backend,
            key,
            initial,
            current,
            listeners: IndexMap::new(),
            next_subscription: 0,
        }
    }

    /// The current configuration.
    pub fn get(&self) -> &Configuration {
        &self.current
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the configuration and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or written. The
    /// in-memory value is left unchanged and no listener is called.
    pub fn set(&mut self, config: Configuration) -> Result<(), Error> {
        let encoded = serde_json::to_string(&config)?;
        self.backend
            .write(&self.key, &encoded)
            .map_err(|source| Error::Write {
                key: self.key.clone(),
                source,
            })?;

        self.current = config;
        self.notify(ChangeSource::Local);
        Ok(())
    }

    /// Derive a new configuration from the current one and persist it.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn update(&mut self, f: impl FnOnce(&mut Configuration)) -> Result<(), Error> {
        let mut next = self.current.clone();
        f(&mut next);
        self.set(next)
    }

    /// Restore and persist the initial configuration.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn reset(&mut self) -> Result<(), Error> {
        info!(key = self.key; "Resetting configuration");
        self.set(self.initial.clone())
    }

    /// Call `listener` after every change until unsubscribed.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Configuration, ChangeSource) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    /// Apply a change another writer made to the backend.
    ///
    /// Changes to other keys and removals (`new_value` of `None`) are ignored.
    /// A value that does not decode is logged and ignored. Otherwise the value
    /// replaces the current configuration without being written back.
    ///
    /// Returns true if the configuration was replaced.
    pub fn apply_external_change(&mut self, key: &str, new_value: Option<&str>) -> bool {
        if key != self.key {
            return false;
        }
        let Some(value) = new_value else {
            return false;
        };

        match serde_json::from_str(value) {
            Ok(config) => {
                debug!(key; "Applying external configuration change");
                self.current = config;
                self.notify(ChangeSource::External);
                true
            }
            Err(err) => {
                error!(key, err:%; "Ignoring undecodable external configuration change");
                false
            }
        }
    }

    fn notify(&mut self, source: ChangeSource) {
        for listener in self.listeners.values_mut() {
            listener(&self.current, source);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use mezzanine_core::model::{AccessoryType, LoadCapacity};

    use super::*;

    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn read(&self, _key: &str) -> io::Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn small() -> Configuration {
        Configuration::new(5000, 3000, 3000, LoadCapacity::Kg350)
    }

    fn recorder() -> (
        Rc<RefCell<Vec<(u32, ChangeSource)>>>,
        impl FnMut(&Configuration, ChangeSource),
    ) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |config: &Configuration, source: ChangeSource| {
            sink.borrow_mut().push((config.length(), source))
        })
    }

    #[test]
    fn test_open_without_stored_value_uses_initial() {
        let store = ConfigurationStore::open(MemoryBackend::new(), DEFAULT_KEY, small());
        assert_eq!(store.get(), &small());
        assert_eq!(store.backend().get(DEFAULT_KEY), None);
    }

    #[test]
    fn test_open_loads_stored_value() {
        let stored = serde_json::to_string(&small()).unwrap();
        let backend = MemoryBackend::new().with_entry(DEFAULT_KEY, stored);

        let store = ConfigurationStore::open(backend, DEFAULT_KEY, Configuration::default());
        assert_eq!(store.get(), &small());
    }

    #[test]
    fn test_open_with_corrupt_value_uses_initial() {
        let backend = MemoryBackend::new().with_entry(DEFAULT_KEY, "{not json");
        let store = ConfigurationStore::open(backend, DEFAULT_KEY, small());
        assert_eq!(store.get(), &small());
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = ConfigurationStore::open(MemoryBackend::new(), "k", Configuration::default());
        store.set(small()).unwrap();

        let persisted: Configuration =
            serde_json::from_str(store.backend().get("k").unwrap()).unwrap();
        assert_eq!(persisted, small());
    }

    #[test]
    fn test_update_derives_from_current() {
        let mut store = ConfigurationStore::open(MemoryBackend::new(), "k", small());
        store
            .update(|config| {
                config.add_accessory(AccessoryType::Stairs);
            })
            .unwrap();

        assert_eq!(store.get().accessories().len(), 1);
        assert_eq!(store.get().length(), 5000);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut store = ConfigurationStore::open(MemoryBackend::new(), "k", Configuration::default());
        store.set(small()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.get(), &Configuration::default());
    }

    #[test]
    fn test_failed_write_keeps_value_and_skips_listeners() {
        let mut store = ConfigurationStore::open(ReadOnlyBackend, "k", Configuration::default());
        let (seen, listener) = recorder();
        store.subscribe(listener);

        let err = store.set(small()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert_eq!(store.get(), &Configuration::default());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_listeners_receive_changes_until_unsubscribed() {
        let mut store = ConfigurationStore::open(MemoryBackend::new(), "k", Configuration::default());
        let (seen, listener) = recorder();
        let id = store.subscribe(listener);

        store.set(small()).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.reset().unwrap();

        assert_eq!(*seen.borrow(), vec![(5000, ChangeSource::Local)]);
    }

    #[test]
    fn test_external_change_filtering() {
        let mut store = ConfigurationStore::open(MemoryBackend::new(), "k", Configuration::default());
        let (seen, listener) = recorder();
        store.subscribe(listener);
        let encoded = serde_json::to_string(&small()).unwrap();

        assert!(!store.apply_external_change("other", Some(&encoded)));
        assert!(!store.apply_external_change("k", None));
        assert!(!store.apply_external_change("k", Some("garbage")));
        assert_eq!(store.get(), &Configuration::default());

        assert!(store.apply_external_change("k", Some(&encoded)));
        assert_eq!(store.get(), &small());
        assert_eq!(*seen.borrow(), vec![(5000, ChangeSource::External)]);
        // External values are not written back.
        assert_eq!(store.backend().get("k"), None);
    }
}
