//! # Proxy headers
//!
//! This crate extracts the client ip address and the public origin of a http request received
//! behind one or more reverse proxies.
//!
//! ## Usage
//!
//! ```rust
//! use proxy_headers::{find_ip_address, public_origin};
//!
//! let request = http::Request::get("/")
//!     .header("x-forwarded-for", "unknown, 203.0.113.195, 70.41.3.18")
//!     .header("x-forwarded-proto", "https")
//!     .header("x-forwarded-host", "myapp.com:8080, load-balancer.internal")
//!     .body(())
//!     .unwrap();
//!
//! assert_eq!(find_ip_address(&request), Some("203.0.113.195"));
//! assert_eq!(public_origin(&request).unwrap(), "https://myapp.com:8080");
//! ```
//!
//! ## Features
//!
//!  * Read the client ip address from the `X-Real-IP`, `X-Forwarded-For` and `CF-Connecting-IP`
//!    headers, in this order, skipping invalid entries like `unknown`.
//!  * Only trust those headers when the peer is a known proxy with [`client_ip`].
//!  * Resolve the public origin from the `X-Forwarded-Proto`, `X-Forwarded-Host` and `Host`
//!    headers, normalized by a [WHATWG URL](https://url.spec.whatwg.org/) parser.
//!  * Fetch the headers from the framework only when needed with [`RequestContext`].
//!
//! ## Security
//!
//! Any client can send those headers. The ip headers should only be read when the server is
//! exclusively reachable through proxies that overwrite them, use [`Config::set_ip_headers`] and
//! [`client_ip`] to match your proxy topology.

mod config;
mod context;
mod error;
mod extract;
mod ip;
mod origin;

pub use config::{Config, DEFAULT_IP_HEADERS, DEFAULT_SCHEME};
pub use context::{public_origin_from_context, resolve_public_origin, RequestContext};
pub use error::OriginError;
pub use extract::HeaderSource;
pub use ip::{client_ip, find_ip_address, find_ip_address_with};
pub use origin::{public_origin, public_origin_with};
