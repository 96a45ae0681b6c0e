//! Poseidon Core Library
//!
//! Provider-neutral server provisioning on top of `poseidon-provider`:
//! - `CloudManager`: validated calls against one bound provider
//! - `ServerManager`: the local record of provisioned servers
//! - `CloudService`: the remote-then-local flows combining both
//!
//! Storage is abstracted by the [`ServerRecordStore`] trait so the core stays
//! independent of any database.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use config::CloudConfig;
pub use error::{CoreError, CoreResult, Operation};
pub use services::{CloudManager, CloudService, ServerManager, ServerUpdate};
pub use traits::{InMemoryServerRecordStore, ServerRecordStore};

// Normalized model shared with the provider crate
pub use poseidon_provider::{
    CreateServerRequest, InstanceSizeBase, ProviderKind, Server, SshKey, UpdateServerRequest,
};
