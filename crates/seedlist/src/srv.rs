//! SRV resolution: lookup, parent-domain validation, host limiting.

use rand::Rng;
use seedlist_core::uri::{DiscoveryUri, DEFAULT_PORT, OPTION_SRV_MAX_HOSTS, OPTION_SRV_SERVICE_NAME};
use seedlist_core::{Result, SeedlistError};
use tracing::debug;

use crate::dns::{DnsResolver, SrvRecord};

/// Service name used when the reference does not set `srvServiceName`.
const DEFAULT_SRV_SERVICE: &str = "mongodb";

/// Resolve and validate the host list for a discovery reference.
///
/// Looks up `_<service>._tcp.<domain>`, requires every target to share the
/// lookup domain's parent, formats targets with the default port elided,
/// and applies `srvMaxHosts` limiting with a randomized subset.
pub(crate) async fn resolve_hosts<D: DnsResolver>(
    dns: &D,
    reference: &DiscoveryUri,
) -> Result<Vec<String>> {
    let service = reference
        .options()
        .get(OPTION_SRV_SERVICE_NAME)
        .unwrap_or(DEFAULT_SRV_SERVICE);
    let max_hosts = max_hosts(reference)?;
    let lookup_name = format!("_{service}._tcp.{}", reference.domain());
    debug!(name = %lookup_name, "resolving SRV records");

    let records = dns.resolve_srv(&lookup_name).await?;
    if records.is_empty() {
        return Err(SeedlistError::NoAddresses {
            domain: lookup_name,
        });
    }

    for record in &records {
        if !shares_parent_domain(&record.target, reference.domain()) {
            return Err(SeedlistError::DomainMismatch {
                target: record.target.clone(),
                domain: reference.domain().to_string(),
            });
        }
    }

    let mut hosts: Vec<String> = records.iter().map(format_address).collect();
    if max_hosts > 0 && max_hosts < hosts.len() {
        debug!(total = hosts.len(), keep = max_hosts, "limiting resolved hosts");
        hosts = shuffled_subset(hosts, max_hosts);
    }
    debug!(count = hosts.len(), "SRV resolution complete");
    Ok(hosts)
}

/// Parse `srvMaxHosts`, defaulting to 0 (unlimited).
fn max_hosts(reference: &DiscoveryUri) -> Result<usize> {
    match reference.options().get(OPTION_SRV_MAX_HOSTS) {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|_| {
            SeedlistError::InvalidUri(format!(
                "{OPTION_SRV_MAX_HOSTS} must be a non-negative integer, got {raw}"
            ))
        }),
    }
}

/// Format one SRV target, eliding the default port.
fn format_address(record: &SrvRecord) -> String {
    let target = record.target.strip_suffix('.').unwrap_or(&record.target);
    if record.port == DEFAULT_PORT {
        target.to_string()
    } else {
        format!("{target}:{}", record.port)
    }
}

/// True when `target` sits under the parent domain of `domain`.
///
/// Exactly one leading label is stripped from each side after trailing-dot
/// normalization, and the comparison is dot-anchored. A single-label name
/// strips to the empty string, so a single-label lookup domain matches only
/// bare single-label targets.
fn shares_parent_domain(target: &str, domain: &str) -> bool {
    fn parent(name: &str) -> &str {
        let name = name.strip_suffix('.').unwrap_or(name);
        name.split_once('.').map_or("", |(_, rest)| rest)
    }

    let target = format!(".{}", parent(target));
    let domain = format!(".{}", parent(domain));
    target.ends_with(&domain)
}

/// Partial Fisher-Yates suffix shuffle.
///
/// Swaps positions from the end downward until only `lower_bound` untouched
/// positions remain, so every element is equally likely to land in the kept
/// suffix. When `limit` divides the length evenly (including `limit == 0`),
/// the whole list is shuffled and returned intact; otherwise the last
/// `limit` positions are kept.
fn shuffled_subset<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    let len = items.len();
    let lower_bound = if limit % len == 0 { 1 } else { len - limit };

    let mut rng = rand::thread_rng();
    let mut remaining = len;
    while remaining > lower_bound {
        let index = rng.gen_range(0..remaining);
        remaining -= 1;
        items.swap(remaining, index);
    }

    if limit % len == 0 {
        items
    } else {
        items.split_off(lower_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parent_domain_accepts_siblings() {
        assert!(shares_parent_domain("asdf.example.com", "server.example.com"));
        assert!(shares_parent_domain("deep.nested.example.com", "server.example.com"));
    }

    #[test]
    fn parent_domain_rejects_strangers() {
        assert!(!shares_parent_domain("asdf.malicious.com", "server.example.com"));
        assert!(!shares_parent_domain("example.org", "server.example.com"));
        // A bare parent is one label short of matching.
        assert!(!shares_parent_domain("example.com", "server.example.com"));
    }

    #[test]
    fn parent_domain_normalizes_trailing_dots() {
        assert!(shares_parent_domain("asdf.example.com.", "server.example.com"));
        assert!(shares_parent_domain("asdf.example.com", "server.example.com."));
    }

    #[test]
    fn parent_domain_two_label_lookup() {
        // Stripping is unconditional: a two-label lookup domain anchors on
        // its TLD, and targets are stripped one label before comparison.
        assert!(shares_parent_domain("server.example.com", "example.com"));
        assert!(!shares_parent_domain("server.example.org", "example.com"));
    }

    #[test]
    fn parent_domain_single_label_lookup() {
        // Both sides strip to the empty string, which still matches.
        assert!(shares_parent_domain("localhost", "localhost"));
        // Any multi-label target anchors on a non-empty parent and misses.
        assert!(!shares_parent_domain("anything.localhost", "localhost"));
        assert!(!shares_parent_domain("evil.com", "localhost"));
    }

    #[test]
    fn format_elides_default_port() {
        assert_eq!(
            format_address(&SrvRecord::new("host.example.com", 27017)),
            "host.example.com"
        );
        assert_eq!(
            format_address(&SrvRecord::new("host.example.com.", 27017)),
            "host.example.com"
        );
        assert_eq!(
            format_address(&SrvRecord::new("host.example.com", 27018)),
            "host.example.com:27018"
        );
    }

    #[test]
    fn subset_keeps_exactly_limit_items() {
        let items: Vec<u32> = (0..10).collect();
        let kept = shuffled_subset(items.clone(), 3);
        assert_eq!(kept.len(), 3);
        let original: HashSet<u32> = items.into_iter().collect();
        assert!(kept.iter().all(|item| original.contains(item)));
    }

    #[test]
    fn subset_with_even_limit_keeps_everything() {
        let items: Vec<u32> = (0..6).collect();

        let all = shuffled_subset(items.clone(), 0);
        assert_eq!(all.len(), 6);
        let mut sorted = all;
        sorted.sort_unstable();
        assert_eq!(sorted, items);

        let all = shuffled_subset(items.clone(), 6);
        assert_eq!(all.len(), 6);
        let mut sorted = all;
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }

    #[test]
    fn subset_selection_is_roughly_uniform() {
        // With 300 single-host draws from three items, each item should be
        // picked at least once unless selection is badly biased.
        let mut seen = HashSet::new();
        for _ in 0..300 {
            let kept = shuffled_subset(vec!["a", "b", "c"], 1);
            assert_eq!(kept.len(), 1);
            seen.insert(kept[0]);
        }
        assert_eq!(seen.len(), 3);
    }
}
