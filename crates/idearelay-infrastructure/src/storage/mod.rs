//! File storage primitives.
//!
//! - `atomic_json`: whole-document JSON files written via tmp file + atomic
//!   rename, with an exclusive lock for read-modify-write updates
//! - `secret_storage`: read-only loader for the secret configuration file

pub mod atomic_json;
pub mod secret_storage;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use secret_storage::{
    OpenRouterSecret, SecretConfig, SecretStorage, SecretStorageError, SmtpSecret,
};
