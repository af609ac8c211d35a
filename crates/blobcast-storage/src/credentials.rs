//! Shared-key credentials for the storage account.

use std::fmt;

use crate::error::{StorageError, StorageResult};

/// Storage account name and shared key.
///
/// Both values are guaranteed non-empty. The key is never printed by the
/// [`Debug`] implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    account_name: String,
    account_key: String,
}

impl StorageCredentials {
    /// Creates credentials from an account name and its shared key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidCredentials`] if either value is empty.
    pub fn new(
        account_name: impl Into<String>,
        account_key: impl Into<String>,
    ) -> StorageResult<Self> {
        let account_name = account_name.into();
        let account_key = account_key.into();

        if account_name.is_empty() {
            return Err(StorageError::invalid_credentials("account name is empty"));
        }

        if account_key.is_empty() {
            return Err(StorageError::invalid_credentials("account key is empty"));
        }

        Ok(Self {
            account_name,
            account_key,
        })
    }

    /// Returns the storage account name.
    #[inline]
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Returns the shared key.
    #[inline]
    pub fn account_key(&self) -> &str {
        &self.account_key
    }
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("account_name", &self.account_name)
            .field("account_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_values() {
        assert!(StorageCredentials::new("", "key").is_err());
        assert!(StorageCredentials::new("account", "").is_err());
        assert!(StorageCredentials::new("account", "key").is_ok());
    }

    #[test]
    fn debug_redacts_account_key() {
        let credentials = StorageCredentials::new("account", "c2VjcmV0").unwrap();
        let debug = format!("{credentials:?}");

        assert!(debug.contains("account"));
        assert!(!debug.contains("c2VjcmV0"));
    }
}
