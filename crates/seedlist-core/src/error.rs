use thiserror::Error;

/// Result type alias for seedlist resolution.
pub type Result<T> = std::result::Result<T, SeedlistError>;

/// Errors that can occur while resolving a seedlist connection string.
///
/// Every variant is terminal: resolution has no retry path, callers retry
/// the whole call if they want to.
#[derive(Error, Debug)]
pub enum SeedlistError {
    /// Input started with neither `mongodb://` nor `mongodb+srv://`.
    #[error("invalid scheme, expected mongodb:// or mongodb+srv://")]
    UnknownScheme,

    /// A discovery-form URI carried an explicit port. Ports come only from
    /// SRV records.
    #[error("mongodb+srv URI cannot have port number")]
    PortNotAllowed,

    /// The discovery-form URI could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidUri(String),

    /// SRV lookup succeeded but returned zero records.
    #[error("no addresses found at {domain}")]
    NoAddresses {
        /// The SRV lookup name that came up empty
        domain: String,
    },

    /// An SRV target does not share the parent domain of the lookup domain.
    #[error("server record {target} does not share hostname with parent URI {domain}")]
    DomainMismatch {
        /// The offending SRV target
        target: String,
        /// The domain the lookup was issued under
        domain: String,
    },

    /// The name exists but has no records of the requested type, or does not
    /// exist at all. The TXT resolver absorbs this; anywhere else it is a
    /// failed lookup.
    #[error("no records found for {domain}")]
    RecordsNotFound {
        /// The queried name
        domain: String,
    },

    /// The underlying DNS lookup failed.
    #[error("dns lookup failed: {0}")]
    Lookup(String),

    /// The platform DNS resolver could not be constructed.
    #[error("dns resolver unavailable: {0}")]
    Resolver(String),

    /// More than one TXT record exists for the lookup domain.
    #[error("multiple text records not allowed")]
    MultipleTxtRecords,

    /// A TXT record option key is outside the allow-list.
    #[error("text record {key} must only set authSource, replicaSet, or loadBalanced")]
    TxtKeyNotAllowed {
        /// The rejected key
        key: String,
    },

    /// A TXT record option was present with an empty value.
    #[error("text record option {key} must not be empty")]
    EmptyTxtOption {
        /// The offending key
        key: String,
    },

    /// `loadBalanced` in a TXT record was something other than `true`/`false`.
    #[error("loadBalanced must be true or false, got {0}")]
    InvalidLoadBalanced(String),
}

impl SeedlistError {
    /// Returns true if this is the tolerated "name/records absent" outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordsNotFound { .. })
    }

    /// Returns true if the error came from the URI itself rather than DNS.
    #[must_use]
    pub const fn is_uri_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownScheme | Self::PortNotAllowed | Self::InvalidUri(_)
        )
    }
}
