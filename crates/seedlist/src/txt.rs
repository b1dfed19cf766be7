//! TXT resolution: lookup, multiplicity check, option parsing.

use seedlist_core::{Result, SeedlistError, TxtOptions};
use tracing::debug;

use crate::dns::DnsResolver;

/// Resolve the TXT options for a lookup domain.
///
/// An absent name or record set yields empty options; at most one TXT
/// record may exist. The record's segments are concatenated with no
/// separator and parsed as URL query syntax.
pub(crate) async fn resolve_options<D: DnsResolver>(dns: &D, domain: &str) -> Result<TxtOptions> {
    debug!(name = %domain, "resolving TXT record");

    let records = match dns.resolve_txt(domain).await {
        Ok(records) => records,
        Err(err) if err.is_not_found() => Vec::new(),
        Err(err) => return Err(err),
    };

    if records.len() > 1 {
        return Err(SeedlistError::MultipleTxtRecords);
    }

    let text = records
        .first()
        .map(|segments| segments.concat())
        .unwrap_or_default();
    let options = TxtOptions::parse(&text)?;
    debug!(found = !options.is_empty(), "TXT resolution complete");
    Ok(options)
}
