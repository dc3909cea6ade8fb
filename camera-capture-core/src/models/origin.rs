use std::net::IpAddr;

/// Whether an origin counts as a secure context for camera access.
///
/// `protocol` is in `Location.protocol` form (`"https:"`), `host` is the bare
/// hostname without port. Secure schemes and loopback hosts are trusted.
pub fn is_potentially_trustworthy(protocol: &str, host: &str) -> bool {
    if matches!(protocol.to_ascii_lowercase().as_str(), "https:" | "wss:" | "file:") {
        return true;
    }
    is_loopback_host(host)
}

fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host == "localhost" || host.ends_with(".localhost") {
        return true;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4.is_loopback(),
        Ok(IpAddr::V6(v6)) => v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback()),
        Err(_) => false,
    }
}
