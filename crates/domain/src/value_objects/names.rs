//! Validated identifier newtypes
//!
//! Prototype ids, container ids, localization keys, and sound paths are all plain
//! strings on the wire. These newtypes ensure they are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for any identifier-like string
const MAX_KEY_LENGTH: usize = 200;

fn validated(raw: String, what: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{what} cannot be empty")));
    }
    if trimmed.len() > MAX_KEY_LENGTH {
        return Err(DomainError::validation(format!(
            "{what} cannot exceed {MAX_KEY_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// PrototypeId
// ============================================================================

/// Identifier of a spawnable prototype (e.g. `WrappedParcel`, `ParcelWrapTrash`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrototypeId(String);

impl PrototypeId {
    /// Create a new validated prototype id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is empty or longer than 200
    /// characters after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        validated(id.into(), "Prototype id").map(Self)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Built-in prototype id known to be valid at compile time.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PrototypeId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PrototypeId> for String {
    fn from(id: PrototypeId) -> String {
        id.0
    }
}

// ============================================================================
// ContainerId
// ============================================================================

/// Name of a container on its owning entity (e.g. `contents`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        validated(id.into(), "Container id").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Built-in container id known to be valid at compile time.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> String {
        id.0
    }
}

// ============================================================================
// LocKey
// ============================================================================

/// Localization key. The engine never renders text, it only hands keys to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocKey(String);

impl LocKey {
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        validated(key.into(), "Localization key").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Built-in localization key known to be valid at compile time.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for LocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LocKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LocKey> for String {
    fn from(key: LocKey) -> String {
        key.0
    }
}

// ============================================================================
// SoundSpec
// ============================================================================

/// A sound resource path or collection name handed to the audio collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SoundSpec(String);

impl SoundSpec {
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        validated(path.into(), "Sound path").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SoundSpec {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<SoundSpec> for String {
    fn from(sound: SoundSpec) -> String {
        sound.0
    }
}
