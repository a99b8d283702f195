use crate::error::OriginError;
use crate::extract::HeaderSource;
use crate::Config;
use url::Url;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const HOST: &str = "host";

/// Resolve the public origin of a request, defaulting to `https` when no `X-Forwarded-Proto`
/// header is present.
///
/// See [`public_origin_with`].
pub fn public_origin<H: HeaderSource + ?Sized>(headers: &H) -> Result<String, OriginError> {
    public_origin_with(headers, Config::shared_default())
}

/// Resolve the public origin, `scheme://host[:port]`, of a request.
///
/// The scheme is read from the `X-Forwarded-Proto` header, or the default scheme of `config`.
/// The host is read from the `X-Forwarded-Host` header, or the `Host` header. When a proxy
/// appended its own host to the list, only the first one is kept.
///
/// The origin is normalized by the URL parser: scheme and host are lowercased and default ports
/// are removed, so `HTTPS://Example.com:443` resolves to `https://example.com` while
/// `https://example.com:8080` is kept as is. Schemes without a tuple origin, like `custom`,
/// resolve to `null`.
///
/// # Errors
///
/// * [`OriginError::MissingHost`] if no host header is present or the host is empty
/// * [`OriginError::InvalidOrigin`] if the scheme and host do not form a valid URL
pub fn public_origin_with<H: HeaderSource + ?Sized>(
    headers: &H,
    config: &Config,
) -> Result<String, OriginError> {
    let scheme = headers
        .first_value(X_FORWARDED_PROTO)
        .unwrap_or(config.default_scheme());

    // a present but empty X-Forwarded-Host does not fall back to Host
    let host = headers
        .first_value(X_FORWARDED_HOST)
        .or_else(|| headers.first_value(HOST))
        .and_then(|value| value.split(',').next())
        .map(|s| s.trim())
        .unwrap_or_default();

    if host.is_empty() {
        tracing::debug!("no host header, cannot resolve public origin");

        return Err(OriginError::MissingHost);
    }

    let url = Url::parse(&format!("{scheme}://{host}")).map_err(|err| {
        tracing::debug!(scheme, host, %err, "invalid public origin");

        OriginError::invalid_origin(scheme, host)
    })?;

    // non special schemes have an opaque origin, serialized as "null"
    let origin = url.origin().ascii_serialization();
    tracing::debug!(%origin, "public origin resolved");

    Ok(origin)
}
