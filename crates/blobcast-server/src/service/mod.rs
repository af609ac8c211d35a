//! Application state and dependency injection.

mod config;
mod credentials;
mod state;

pub use crate::service::config::ServiceConfig;
pub use crate::service::credentials::{
    ACCESS_KEY_VAR, ACCOUNT_NAME_VAR, CredentialError, CredentialSource, EnvCredentials,
    StaticCredentials,
};
pub use crate::service::state::ServiceState;
