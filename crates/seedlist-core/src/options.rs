//! TXT record option schema.
//!
//! A lookup domain may carry at most one TXT record, and that record may
//! only set `authSource`, `replicaSet`, and `loadBalanced`. The record text
//! uses URL query syntax (`authSource=admin&replicaSet=rs0`).

use url::form_urlencoded;

use crate::error::{Result, SeedlistError};

/// Default database for authentication.
pub const OPTION_AUTH_SOURCE: &str = "authSource";

/// Replica set name.
pub const OPTION_REPLICA_SET: &str = "replicaSet";

/// Load-balanced topology flag.
pub const OPTION_LOAD_BALANCED: &str = "loadBalanced";

/// Options read from the lookup domain's TXT record.
///
/// Empty when the domain has no TXT record. Values here only fill gaps in
/// the reference's own query options, never override them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxtOptions {
    /// `authSource` value, if set.
    pub auth_source: Option<String>,
    /// `replicaSet` value, if set.
    pub replica_set: Option<String>,
    /// `loadBalanced` value, if set.
    pub load_balanced: Option<bool>,
}

impl TxtOptions {
    /// Parse the concatenated text of a single TXT record.
    ///
    /// # Errors
    ///
    /// Returns [`SeedlistError::TxtKeyNotAllowed`] for keys outside the
    /// allow-list, [`SeedlistError::EmptyTxtOption`] for present-but-empty
    /// values, and [`SeedlistError::InvalidLoadBalanced`] when
    /// `loadBalanced` is not exactly `true` or `false`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut options = Self::default();
        if raw.is_empty() {
            return Ok(options);
        }

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                OPTION_AUTH_SOURCE | OPTION_REPLICA_SET | OPTION_LOAD_BALANCED
                    if value.is_empty() =>
                {
                    return Err(SeedlistError::EmptyTxtOption {
                        key: key.into_owned(),
                    });
                }
                OPTION_AUTH_SOURCE => {
                    // First occurrence wins, matching URL query get() semantics.
                    if options.auth_source.is_none() {
                        options.auth_source = Some(value.into_owned());
                    }
                }
                OPTION_REPLICA_SET => {
                    if options.replica_set.is_none() {
                        options.replica_set = Some(value.into_owned());
                    }
                }
                OPTION_LOAD_BALANCED => {
                    let flag = match value.as_ref() {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(SeedlistError::InvalidLoadBalanced(other.to_string()))
                        }
                    };
                    if options.load_balanced.is_none() {
                        options.load_balanced = Some(flag);
                    }
                }
                other => {
                    return Err(SeedlistError::TxtKeyNotAllowed {
                        key: other.to_string(),
                    });
                }
            }
        }

        Ok(options)
    }

    /// True when no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.auth_source.is_none() && self.replica_set.is_none() && self.load_balanced.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_allowed_keys() {
        let options =
            TxtOptions::parse("authSource=admin&replicaSet=rs0&loadBalanced=false").unwrap();
        assert_eq!(options.auth_source.as_deref(), Some("admin"));
        assert_eq!(options.replica_set.as_deref(), Some("rs0"));
        assert_eq!(options.load_balanced, Some(false));
    }

    #[test]
    fn parse_empty_record() {
        let options = TxtOptions::parse("").unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = TxtOptions::parse("connectTimeoutMS=5000").unwrap_err();
        assert!(matches!(
            err,
            SeedlistError::TxtKeyNotAllowed { key } if key == "connectTimeoutMS"
        ));
    }

    #[test]
    fn empty_value_is_rejected() {
        let err = TxtOptions::parse("authSource=").unwrap_err();
        assert!(matches!(
            err,
            SeedlistError::EmptyTxtOption { key } if key == "authSource"
        ));

        // A bare key parses as an empty value too.
        let err = TxtOptions::parse("replicaSet").unwrap_err();
        assert!(matches!(err, SeedlistError::EmptyTxtOption { .. }));
    }

    #[test]
    fn load_balanced_must_be_boolean() {
        assert_eq!(
            TxtOptions::parse("loadBalanced=true").unwrap().load_balanced,
            Some(true)
        );
        let err = TxtOptions::parse("loadBalanced=bla").unwrap_err();
        assert!(matches!(err, SeedlistError::InvalidLoadBalanced(v) if v == "bla"));
        // Case-sensitive: "True" is not a boolean here.
        let err = TxtOptions::parse("loadBalanced=True").unwrap_err();
        assert!(matches!(err, SeedlistError::InvalidLoadBalanced(_)));
    }

    #[test]
    fn first_occurrence_wins() {
        let options = TxtOptions::parse("authSource=first&authSource=second").unwrap();
        assert_eq!(options.auth_source.as_deref(), Some("first"));
    }
}
