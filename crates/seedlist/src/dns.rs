//! DNS capability boundary.
//!
//! The resolver never talks to DNS directly; it goes through the
//! [`DnsResolver`] trait so callers can inject their own lookup
//! implementation. [`SystemDns`] is the platform default, backed by the
//! system resolver configuration via hickory.

use async_trait::async_trait;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, ResolveErrorKind, TokioResolver};
use seedlist_core::{Result, SeedlistError};

/// One resolved SRV target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    /// Target hostname, possibly with a trailing dot.
    pub target: String,
    /// Target port.
    pub port: u16,
}

impl SrvRecord {
    /// Construct a record from a target hostname and port.
    #[must_use]
    pub fn new(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
        }
    }
}

/// The two lookups seedlist resolution needs.
///
/// Test doubles and the platform default satisfy the same contract; there
/// is no hierarchy beyond this trait.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Look up SRV records for `name` (already service-prefixed).
    async fn resolve_srv(&self, name: &str) -> Result<Vec<SrvRecord>>;

    /// Look up TXT records for `name`. Each inner vec holds one record's
    /// text segments, to be concatenated with no separator.
    ///
    /// An absent name or record set must surface as
    /// [`SeedlistError::RecordsNotFound`] so callers can tell it apart
    /// from transport failures.
    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>>;
}

#[async_trait]
impl<D: DnsResolver + ?Sized> DnsResolver for &D {
    async fn resolve_srv(&self, name: &str) -> Result<Vec<SrvRecord>> {
        (**self).resolve_srv(name).await
    }

    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>> {
        (**self).resolve_txt(name).await
    }
}

/// Platform-default DNS capability using the system resolver configuration.
pub struct SystemDns {
    resolver: TokioResolver,
}

impl SystemDns {
    /// Create a capability from the system resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SeedlistError::Resolver`] when the system configuration
    /// cannot be read.
    pub fn new() -> Result<Self> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| SeedlistError::Resolver(e.to_string()))?
            .build();
        Ok(Self { resolver })
    }
}

#[async_trait]
impl DnsResolver for SystemDns {
    async fn resolve_srv(&self, name: &str) -> Result<Vec<SrvRecord>> {
        let lookup = self
            .resolver
            .srv_lookup(name)
            .await
            .map_err(|e| lookup_error(name, &e))?;

        Ok(lookup
            .iter()
            .map(|srv| SrvRecord::new(srv.target().to_utf8(), srv.port()))
            .collect())
    }

    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>> {
        let lookup = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(|e| lookup_error(name, &e))?;

        Ok(lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|segment| String::from_utf8_lossy(segment).into_owned())
                    .collect()
            })
            .collect())
    }
}

/// Map a hickory failure onto the crate taxonomy. "No records" keeps its
/// identity so the TXT path can absorb it.
fn lookup_error(name: &str, err: &ResolveError) -> SeedlistError {
    if let ResolveErrorKind::Proto(proto) = err.kind() {
        if matches!(proto.kind(), ProtoErrorKind::NoRecordsFound { .. }) {
            return SeedlistError::RecordsNotFound {
                domain: name.to_string(),
            };
        }
    }
    SeedlistError::Lookup(err.to_string())
}
