//! CIDR containment between prefixes given as text.
//!
//! Unparsable prefixes never match anything; they are not errors.
use ipnet::IpNet;
use log::debug;
use std::str::FromStr;

fn parse_prefix(text: &str) -> Option<IpNet> {
    match IpNet::from_str(text.trim()) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("cannot parse prefix {:?}: {}", text, e);
            None
        }
    }
}

/// Check whether `candidate` lies within `container`.
///
/// Both prefixes must be of the same address family and `candidate` must be at least as specific
/// as `container`. Host bits on either side are masked off.
///
/// ```rust
/// use bgpkit_rislive::parser::prefix::contains;
///
/// assert!(contains("192.168.0.0/16", "192.168.0.0/24"));
/// assert!(!contains("192.168.0.0/16", "197.168.0.0/16"));
/// assert!(!contains("192.168.0.0/16", "2001:db8::/32"));
/// assert!(!contains("192.b.0.0/16", "192.168.0.0/24"));
/// ```
pub fn contains(container: &str, candidate: &str) -> bool {
    match (parse_prefix(container), parse_prefix(candidate)) {
        (Some(container), Some(candidate)) => net_contains(&container, &candidate),
        _ => false,
    }
}

fn net_contains(container: &IpNet, candidate: &IpNet) -> bool {
    match (container, candidate) {
        (IpNet::V4(c), IpNet::V4(d)) => d.prefix_len() >= c.prefix_len() && c.contains(&d.network()),
        (IpNet::V6(c), IpNet::V6(d)) => d.prefix_len() >= c.prefix_len() && c.contains(&d.network()),
        _ => false,
    }
}

/// Check whether any of `candidates` lies within any of `containers`.
pub fn any_contains<C, D>(containers: C, candidates: D) -> bool
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    D: IntoIterator,
    D::Item: AsRef<str>,
{
    // parse each side once; malformed entries drop out here
    let containers: Vec<IpNet> = containers
        .into_iter()
        .filter_map(|c| parse_prefix(c.as_ref()))
        .collect();
    if containers.is_empty() {
        return false;
    }
    candidates
        .into_iter()
        .filter_map(|d| parse_prefix(d.as_ref()))
        .any(|d| containers.iter().any(|c| net_contains(c, &d)))
}
