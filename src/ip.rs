use crate::extract::HeaderSource;
use crate::Config;
use core::net::{IpAddr, Ipv6Addr};

/// Parse an IPv4 or IPv6 literal, accepting scoped IPv6 literals like `fe80::1%eth0`.
///
/// The zone index is dropped from the returned address.
fn parse_ip(candidate: &str) -> Option<IpAddr> {
    if let Ok(ip) = candidate.parse::<IpAddr>() {
        return Some(ip);
    }

    let (addr, zone) = candidate.split_once('%')?;

    if zone.is_empty()
        || !zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ':'))
    {
        return None;
    }

    addr.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
}

/// Find the client ip address in the `X-Real-IP`, `X-Forwarded-For` and `CF-Connecting-IP`
/// headers, in this order.
///
/// See [`find_ip_address_with`].
pub fn find_ip_address<H: HeaderSource + ?Sized>(headers: &H) -> Option<&str> {
    find_ip_address_with(headers, Config::shared_default())
}

/// Find the client ip address in the ip headers of `config`.
///
/// Headers are read in priority order. A header may hold a comma separated list of addresses
/// appended by each proxy in the chain: the leftmost valid address is returned as written in the
/// header, invalid entries such as `unknown` are skipped. When a header has no valid entry the
/// next one is read.
///
/// Returns `None` if no header holds a valid address, which is expected when there is no proxy in
/// front of the server.
pub fn find_ip_address_with<'a, H: HeaderSource + ?Sized>(
    headers: &'a H,
    config: &Config,
) -> Option<&'a str> {
    for name in config.ip_headers() {
        for candidate in headers
            .header_values(name)
            .flat_map(|vals| vals.split(','))
            .map(|s| s.trim())
        {
            if parse_ip(candidate).is_some() {
                tracing::debug!(header = name, ip = candidate, "client ip address found");

                return Some(candidate);
            }

            if !candidate.is_empty() {
                tracing::trace!(header = name, candidate, "skipping invalid ip address");
            }
        }
    }

    None
}

/// Get the client ip address of a request received from `peer`.
///
/// The ip headers can be set by anyone talking to the server, so they are only read if `peer` is
/// trusted by `config`. Otherwise, or if no header holds a valid address, `peer` is returned.
pub fn client_ip<H: HeaderSource + ?Sized>(peer: IpAddr, headers: &H, config: &Config) -> IpAddr {
    if !config.is_ip_trusted(&peer) {
        tracing::debug!(%peer, "untrusted peer, ignoring ip headers");

        return peer;
    }

    find_ip_address_with(headers, config)
        .and_then(parse_ip)
        .unwrap_or(peer)
}
