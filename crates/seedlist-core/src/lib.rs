//! Core types for DNS seedlist connection-string resolution.
//!
//! This crate provides the data model shared by the resolver:
//!
//! - **Uri**: [`DiscoveryUri`] parsing and direct-form serialization
//! - **Options**: the TXT record schema with [`TxtOptions`]
//! - **Errors**: the full failure taxonomy in [`SeedlistError`]

#![doc(html_root_url = "https://docs.rs/seedlist-core/0.2.0")]

mod error;
pub mod options;
pub mod uri;

pub use error::{Result, SeedlistError};
pub use options::TxtOptions;
pub use uri::{DiscoveryUri, QueryOptions};
