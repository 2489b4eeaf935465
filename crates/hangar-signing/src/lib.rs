//! Hangar Signing - Signing secrets and identity resolution
//!
//! This crate loads the optional `key.properties` secrets file and turns it
//! into a per-variant [`SigningIdentity`]:
//! - complete secrets: a dedicated identity, values copied verbatim
//! - incomplete or absent secrets: a fallback identity, gated for release
//!   variants by [`SigningPolicy`]

pub mod error;
pub mod identity;
pub mod resolver;
pub mod secrets;

pub use error::{Result, SigningError};
pub use identity::SigningIdentity;
pub use resolver::{resolve_signing_identity, SigningPolicy};
pub use secrets::{load_secrets, Secrets, SecretsSource, REQUIRED_KEYS};
