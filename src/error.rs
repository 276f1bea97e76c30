use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    /// The key was not registered when a reveal was requested.
    #[error("revealable with key {key} not found")]
    KeyNotFound { key: String },
}

impl RevealError {
    pub(crate) fn key_not_found<K: core::fmt::Debug>(key: &K) -> RevealError {
        RevealError::KeyNotFound {
            key: format!("{:?}", key),
        }
    }
}

pub type Result<T, E = RevealError> = core::result::Result<T, E>;
