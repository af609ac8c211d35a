//! Storage credential sources.
//!
//! Credentials are resolved on every request. Nothing is cached, so rotating
//! the account key in the environment takes effect on the next request.

use std::env::{self, VarError};

use blobcast_storage::{StorageCredentials, StorageError};

use crate::tracing_targets::TRACING_TARGET_CREDENTIALS;

/// Environment variable holding the storage account name.
pub const ACCOUNT_NAME_VAR: &str = "STORAGE_ACCOUNT_NAME";

/// Environment variable holding the storage account shared key.
pub const ACCESS_KEY_VAR: &str = "STORAGE_ACCESS_KEY";

/// Failure to resolve storage credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The variable is not set (or is not valid unicode).
    #[error("environment variable {variable} is not set")]
    Unset { variable: String },

    /// The variable is set but empty.
    #[error("environment variable {variable} is empty")]
    Empty { variable: String },

    /// The resolved values were rejected.
    #[error(transparent)]
    Invalid(#[from] StorageError),
}

/// A source of storage account credentials.
pub trait CredentialSource: Send + Sync + 'static {
    /// Resolves the credentials for the current request.
    fn resolve(&self) -> Result<StorageCredentials, CredentialError>;
}

/// Reads credentials from the process environment on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    account_name_var: String,
    access_key_var: String,
}

impl EnvCredentials {
    /// Reads [`ACCOUNT_NAME_VAR`] and [`ACCESS_KEY_VAR`].
    pub fn new() -> Self {
        Self::with_vars(ACCOUNT_NAME_VAR, ACCESS_KEY_VAR)
    }

    /// Reads the given variable names instead of the defaults.
    pub fn with_vars(account_name_var: impl Into<String>, access_key_var: impl Into<String>) -> Self {
        Self {
            account_name_var: account_name_var.into(),
            access_key_var: access_key_var.into(),
        }
    }

    fn read(variable: &str) -> Result<String, CredentialError> {
        match env::var(variable) {
            Ok(value) if value.is_empty() => Err(CredentialError::Empty {
                variable: variable.to_owned(),
            }),
            Ok(value) => Ok(value),
            Err(VarError::NotPresent | VarError::NotUnicode(_)) => Err(CredentialError::Unset {
                variable: variable.to_owned(),
            }),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn resolve(&self) -> Result<StorageCredentials, CredentialError> {
        let account_name = Self::read(&self.account_name_var)?;
        let account_key = Self::read(&self.access_key_var)?;

        tracing::trace!(
            target: TRACING_TARGET_CREDENTIALS,
            account = %account_name,
            "Resolved storage credentials from environment"
        );

        Ok(StorageCredentials::new(account_name, account_key)?)
    }
}

/// Fixed credentials, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    credentials: Option<StorageCredentials>,
}

impl StaticCredentials {
    /// Always resolves to `credentials`.
    pub fn new(credentials: StorageCredentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    /// Never resolves, as if the environment were empty.
    pub fn unset() -> Self {
        Self { credentials: None }
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self) -> Result<StorageCredentials, CredentialError> {
        self.credentials
            .clone()
            .ok_or_else(|| CredentialError::Unset {
                variable: ACCOUNT_NAME_VAR.to_owned(),
            })
    }
}
