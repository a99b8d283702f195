use core::net::IpAddr;
use std::sync::OnceLock;

use ipnet::{AddrParseError, IpNet};

/// Headers inspected by the ip extractor, in priority order
pub const DEFAULT_IP_HEADERS: [&str; 3] = ["x-real-ip", "x-forwarded-for", "cf-connecting-ip"];

/// Scheme used when the `X-Forwarded-Proto` header is missing
pub const DEFAULT_SCHEME: &str = "https";

/// Config for the client ip extractor and the public origin resolver
///
/// By default, it trusts the following peers:
///   - IPV4 Loopback
///   - IPV4 Private Networks
///   - IPV6 Loopback
///   - IPV6 Private Networks
///
/// The ip headers are read in the order `X-Real-IP`, `X-Forwarded-For`, `CF-Connecting-IP` and the
/// default scheme is `https`.
///
/// # Example
/// ```
/// use proxy_headers::Config;
///
/// let mut config = Config::new_local();
/// config.add_trusted_ip("168.10.0.0/16").unwrap();
/// config.set_ip_headers(["CF-Connecting-IP", "X-Forwarded-For"]);
/// config.set_default_scheme("http");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    trusted_ips: Vec<IpNet>,
    ip_headers: Vec<String>,
    default_scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new_local()
    }
}

impl Config {
    /// Create a new Config with no trusted peers, the default ip headers and the default scheme
    pub fn new() -> Self {
        Self {
            trusted_ips: Vec::new(),
            ip_headers: DEFAULT_IP_HEADERS.iter().map(|h| h.to_string()).collect(),
            default_scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    /// Config without trusted peers used by the functions that take no config
    pub(crate) fn shared_default() -> &'static Self {
        static CONFIG: OnceLock<Config> = OnceLock::new();

        CONFIG.get_or_init(Self::new)
    }

    /// Create a new Config with local and private networks trusted
    pub fn new_local() -> Self {
        let mut config = Self::new();

        config.trusted_ips = vec![
            // IPV4 Loopback
            "127.0.0.0/8".parse().unwrap(),
            // IPV4 Private Networks
            "10.0.0.0/8".parse().unwrap(),
            "172.16.0.0/12".parse().unwrap(),
            "192.168.0.0/16".parse().unwrap(),
            // IPV6 Loopback
            "::1/128".parse().unwrap(),
            // IPV6 Private network
            "fd00::/8".parse().unwrap(),
        ];

        config
    }

    /// Add a trusted peer to the list of trusted peers
    ///
    /// proxy can be an IP address or a CIDR
    pub fn add_trusted_ip(&mut self, proxy: &str) -> Result<(), AddrParseError> {
        match proxy.parse() {
            Ok(v) => {
                self.trusted_ips.push(v);

                Ok(())
            }
            Err(e) => match proxy.parse::<IpAddr>() {
                Ok(v) => {
                    self.trusted_ips.push(IpNet::from(v));

                    Ok(())
                }
                _ => Err(e),
            },
        }
    }

    /// Check if a peer address is trusted given the list of trusted networks
    pub fn is_ip_trusted(&self, remote_addr: &IpAddr) -> bool {
        self.trusted_ips
            .iter()
            .any(|network| network.contains(remote_addr))
    }

    /// Replace the headers read by the ip extractor, the first one having the highest priority
    ///
    /// Every header listed here can be spoofed by a client talking to the server directly, only
    /// list the headers your proxies **always** overwrite.
    pub fn set_ip_headers<I, S>(&mut self, headers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ip_headers = headers
            .into_iter()
            .map(|name| name.as_ref().trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
    }

    /// Headers read by the ip extractor, lowercased and in priority order
    pub fn ip_headers(&self) -> impl Iterator<Item = &str> {
        self.ip_headers.iter().map(String::as_str)
    }

    /// Set the scheme used when no `X-Forwarded-Proto` header is present
    pub fn set_default_scheme(&mut self, scheme: &str) {
        self.default_scheme = scheme.to_string();
    }

    pub fn default_scheme(&self) -> &str {
        &self.default_scheme
    }
}
