//! Error types for the fallible edges of the game.
//!
//! Gameplay itself never fails: out-of-order input is ignored by the round
//! controller. Only persistence, shop transactions and tuning overrides
//! return errors, and callers are expected to log and carry on.

use std::fmt;

/// Save/load failure.
#[derive(Debug)]
pub enum PersistError {
    /// No storage backend is reachable (private browsing, no window, ...).
    Unavailable,
    /// Progress could not be encoded.
    Serialize(serde_json::Error),
    /// Stored data is not a valid save blob.
    Deserialize(serde_json::Error),
    /// The backend rejected the read or write (quota exceeded, etc).
    Storage(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Unavailable => write!(f, "storage unavailable"),
            PersistError::Serialize(e) => write!(f, "failed to encode progress: {e}"),
            PersistError::Deserialize(e) => write!(f, "failed to decode progress: {e}"),
            PersistError::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Serialize(e) | PersistError::Deserialize(e) => Some(e),
            _ => None,
        }
    }
}

/// Reason a shop or settings action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    UnknownSkin(String),
    UnknownBackground(String),
    AlreadyOwned(String),
    NotOwned(String),
    InsufficientPoints { price: u64, available: u64 },
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::UnknownSkin(id) => write!(f, "unknown skin '{id}'"),
            ShopError::UnknownBackground(id) => write!(f, "unknown background '{id}'"),
            ShopError::AlreadyOwned(id) => write!(f, "skin '{id}' is already owned"),
            ShopError::NotOwned(id) => write!(f, "skin '{id}' is not owned"),
            ShopError::InsufficientPoints { price, available } => {
                write!(f, "need {price} points, have {available}")
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Rejected tuning override.
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "tuning field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
