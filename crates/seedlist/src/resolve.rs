//! Seedlist resolution entry point.
//!
//! Classifies the input (pass-through, discovery, reject), runs the SRV and
//! TXT lookups concurrently, and composes the direct connection string.

use seedlist_core::options::{OPTION_AUTH_SOURCE, OPTION_LOAD_BALANCED, OPTION_REPLICA_SET};
use seedlist_core::uri::{
    DiscoveryUri, OPTION_SRV_MAX_HOSTS, OPTION_SRV_SERVICE_NAME, SCHEME_DIRECT, SCHEME_DISCOVERY,
};
use seedlist_core::{Result, SeedlistError, TxtOptions};
use tracing::debug;

use crate::dns::{DnsResolver, SystemDns};
use crate::{srv, txt};

/// Expands seedlist-discovery connection strings into direct ones.
///
/// One resolution is one call: the resolver keeps no state between calls,
/// and concurrent calls never interfere.
pub struct SeedlistResolver<D = SystemDns> {
    dns: D,
}

impl SeedlistResolver<SystemDns> {
    /// Create a resolver backed by the platform DNS configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SeedlistError::Resolver`] when the system resolver
    /// configuration cannot be read.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dns: SystemDns::new()?,
        })
    }
}

impl<D: DnsResolver> SeedlistResolver<D> {
    /// Create a resolver with an injected DNS capability.
    #[must_use]
    pub const fn with_dns(dns: D) -> Self {
        Self { dns }
    }

    /// Resolve `uri` into a direct connection string.
    ///
    /// A `mongodb://` input is returned unchanged, byte-for-byte, with no
    /// DNS traffic. A `mongodb+srv://` input is expanded through SRV and
    /// TXT lookups issued concurrently; the first failure aborts the call.
    ///
    /// # Errors
    ///
    /// Any of the [`SeedlistError`] variants; none are retryable at this
    /// layer.
    pub async fn resolve(&self, uri: &str) -> Result<String> {
        if uri.starts_with(SCHEME_DIRECT) {
            return Ok(uri.to_string());
        }
        if !uri.starts_with(SCHEME_DISCOVERY) {
            return Err(SeedlistError::UnknownScheme);
        }

        let reference = DiscoveryUri::parse(uri)?;
        debug!(domain = %reference.domain(), "expanding seedlist reference");

        let (hosts, txt_options) = tokio::try_join!(
            srv::resolve_hosts(&self.dns, &reference),
            txt::resolve_options(&self.dns, reference.domain()),
        )?;

        Ok(merge(&reference, &hosts, &txt_options))
    }
}

/// Compose the final string. TXT options only fill gaps (the reference's
/// own options win), `tls=true` is injected when neither `tls` nor `ssl`
/// survives the merge, and the discovery control options are stripped.
fn merge(reference: &DiscoveryUri, hosts: &[String], txt_options: &TxtOptions) -> String {
    let mut options = reference.options().clone();

    if let Some(auth_source) = &txt_options.auth_source {
        if !options.contains(OPTION_AUTH_SOURCE) {
            options.append(OPTION_AUTH_SOURCE, auth_source.clone());
        }
    }
    if let Some(replica_set) = &txt_options.replica_set {
        if !options.contains(OPTION_REPLICA_SET) {
            options.append(OPTION_REPLICA_SET, replica_set.clone());
        }
    }
    if let Some(load_balanced) = txt_options.load_balanced {
        if !options.contains(OPTION_LOAD_BALANCED) {
            options.append(OPTION_LOAD_BALANCED, load_balanced.to_string());
        }
    }

    if !options.contains("tls") && !options.contains("ssl") {
        options.append("tls", "true");
    }

    options.remove(OPTION_SRV_SERVICE_NAME);
    options.remove(OPTION_SRV_MAX_HOSTS);

    reference.to_connection_string(hosts, &options)
}
