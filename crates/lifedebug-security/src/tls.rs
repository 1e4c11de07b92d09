// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS enforcement for outbound HTTP connections.
//!
//! Provides a reqwest client builder with a TLS 1.2 floor and URL validation
//! that blocks plaintext connections to remote hosts.

use std::net::IpAddr;
use std::time::Duration;

use lifedebug_core::LifeDebugError;
use tracing::error;
use url::Host;

/// Build a reqwest::Client with security defaults.
///
/// - Minimum TLS 1.2 for all connections.
/// - Optional whole-request timeout; `None` keeps reqwest's default (no timeout).
pub fn build_secure_client(timeout: Option<Duration>) -> Result<reqwest::Client, LifeDebugError> {
    let mut builder = reqwest::Client::builder().min_tls_version(reqwest::tls::Version::TLS_1_2);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| {
        error!("failed to build HTTP client: {e}");
        LifeDebugError::Internal(format!("failed to build HTTP client: {e}"))
    })
}

/// Validate a URL against the transport policy.
///
/// - Loopback hosts (127.0.0.0/8, ::1, localhost) may use any scheme.
/// - Remote hosts MUST use HTTPS.
pub fn validate_url(url: &str) -> Result<(), LifeDebugError> {
    let parsed =
        url::Url::parse(url).map_err(|e| LifeDebugError::Config(format!("invalid URL: {e}")))?;

    if parsed.host().is_some_and(|host| is_loopback_host(&host)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        error!(url = %url, "TLS required for remote connections");
        return Err(LifeDebugError::Config(
            "TLS required for remote connections -- use HTTPS".to_string(),
        ));
    }

    Ok(())
}

/// Whether a parsed URL host is the local machine.
///
/// Only real loopback addresses and the literal `localhost` domain count;
/// a domain such as `127.example.com` is remote.
pub fn is_loopback_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(domain) => domain.eq_ignore_ascii_case("localhost"),
        Host::Ipv4(ip) => ip.is_loopback(),
        Host::Ipv6(ip) => ip.is_loopback(),
    }
}

/// Check if a host string refers to the local machine.
///
/// Accepts bare or bracketed IPv6 (`::1`, `[::1]`).
pub fn is_localhost(addr: &str) -> bool {
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return ip.is_loopback();
    }
    match Host::parse(addr) {
        Ok(Host::Domain(domain)) => is_loopback_host(&Host::Domain(domain.as_str())),
        Ok(Host::Ipv4(ip)) => ip.is_loopback(),
        Ok(Host::Ipv6(ip)) => ip.is_loopback(),
        Err(_) => false,
    }
}
