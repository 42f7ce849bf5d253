use thiserror::Error;

/// Error type shared by every discovery provider and the supporting
/// parsing/binding utilities.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A parameter value did not match the shape of the target config field
    #[error("Configuration decode error: {message}")]
    ConfigDecode { message: String },

    /// Malformed initial-cluster descriptor or member address
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// The same member name appeared more than once in a descriptor
    #[error("Instance name {name} is found multiple times")]
    DuplicateName { name: String },

    /// The parsed descriptor disagrees with the declared cluster size
    #[error("Expected initial-cluster {cluster} to have length {expected}, found {found}")]
    SizeMismatch {
        cluster: String,
        expected: usize,
        found: usize,
    },

    /// Lookup of an unregistered provider name
    #[error("Provider not found: {name}")]
    NotFound { name: String },

    /// A provider name was registered twice
    #[error("Provider already registered: {name}")]
    AlreadyRegistered { name: String },

    /// A status query ran before the provider was configured
    #[error("Provider {provider} is not configured")]
    NotConfigured { provider: String },

    /// Filesystem or container-runtime access failure
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ProviderError {
    /// Create a configuration decode error
    pub fn config_decode<S: Into<String>>(message: S) -> Self {
        Self::ConfigDecode {
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a duplicate name error
    pub fn duplicate_name<S: Into<String>>(name: S) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a size mismatch error
    pub fn size_mismatch<S: Into<String>>(cluster: S, expected: usize, found: usize) -> Self {
        Self::SizeMismatch {
            cluster: cluster.into(),
            expected,
            found,
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a not configured error
    pub fn not_configured<S: Into<String>>(provider: S) -> Self {
        Self::NotConfigured {
            provider: provider.into(),
        }
    }

    /// Create an IO error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Configure-time validation failures are fatal to the caller; status-time
    /// failures are expected to be retried by the caller's polling loop.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ProviderError::Io { .. })
    }
}

/// Result type alias for discovery operations
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::io(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::config_decode(err.to_string())
    }
}
