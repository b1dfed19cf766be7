//! DNS seedlist connection-string resolution.
//!
//! Expands a seedlist-discovery reference (`mongodb+srv://…`) into a direct
//! connection string (`mongodb://…`) by resolving SRV records for the host
//! list and a TXT record for default options, then merging both with the
//! reference's own query options.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seedlist::SeedlistResolver;
//!
//! #[tokio::main]
//! async fn main() -> seedlist::Result<()> {
//!     let resolver = SeedlistResolver::new()?;
//!     let target = resolver
//!         .resolve("mongodb+srv://server.example.com/?authSource=test")
//!         .await?;
//!     println!("{target}");
//!     Ok(())
//! }
//! ```
//!
//! DNS is an injected capability: anything implementing [`DnsResolver`] can
//! stand in for the system resolver, which is how the integration tests
//! drive resolution without the network.

#![doc(html_root_url = "https://docs.rs/seedlist/0.2.0")]

pub mod dns;
mod resolve;
mod srv;
mod txt;

pub use dns::{DnsResolver, SrvRecord, SystemDns};
pub use resolve::SeedlistResolver;

// Re-export core types
pub use seedlist_core::{DiscoveryUri, QueryOptions, Result, SeedlistError, TxtOptions};
