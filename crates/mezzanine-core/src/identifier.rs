//! Accessory identifiers.
//!
//! Every accessory in a [`Configuration`](crate::model::Configuration) carries an
//! [`AccessoryId`] used to update or remove it. Identifiers created by the
//! configurator have the form `<type>-<unix-millis>`, with a numeric suffix
//! appended when that would collide with an existing accessory.

use std::{borrow::Borrow, fmt};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique (within a configuration) identifier of an accessory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessoryId(String);

impl AccessoryId {
    /// Wraps an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a timestamped identifier with the given prefix.
    ///
    /// `is_taken` is consulted for every candidate; the first free candidate
    /// is returned.
    pub fn generate(prefix: &str, is_taken: impl Fn(&str) -> bool) -> Self {
        let base = format!("{prefix}-{}", Utc::now().timestamp_millis());
        if !is_taken(&base) {
            return Self(base);
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !is_taken(&candidate) {
                return Self(candidate);
            }
            suffix += 1;
        }
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccessoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccessoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for AccessoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AccessoryId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccessoryId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
