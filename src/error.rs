use thiserror::Error;

/// Errors returned when resolving the public origin of a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    /// Neither `X-Forwarded-Host` nor `Host` carry a usable host
    #[error("Missing host headers; cannot determine public origin.")]
    MissingHost,
    /// The scheme and host taken from the headers do not form a valid origin
    #[error("Invalid origin generated: {scheme}://{host}")]
    InvalidOrigin { scheme: String, host: String },
}

impl OriginError {
    pub(crate) fn invalid_origin(scheme: &str, host: &str) -> Self {
        Self::InvalidOrigin {
            scheme: scheme.to_string(),
            host: host.to_string(),
        }
    }
}
