//! Host shape rules applied after `url::Url` parsing succeeded.

use std::net::Ipv4Addr;
use url::Host;

const MAX_LABEL_LEN: usize = 63;
const PUNYCODE_PREFIX: &str = "xn--";

/// Returns true for IP literals and for domains that have at least two
/// labels and an alphabetic (or punycode) top-level label.
///
/// `typed` is the host as it appears in the input. An IPv4 host counts only
/// when it was typed as a dotted quad: the parser also turns shorthand such
/// as `42` or `0x7f` into addresses.
pub fn is_acceptable_host(host: &Host<&str>, typed: &str) -> bool {
    match host {
        Host::Ipv4(_) => typed.parse::<Ipv4Addr>().is_ok(),
        Host::Ipv6(_) => true,
        Host::Domain(domain) => is_acceptable_domain(domain),
    }
}

/// Host part of `url_text` as typed: authority without userinfo or port.
pub(crate) fn typed_host(url_text: &str) -> &str {
    let rest = url_text.split_once("://").map_or(url_text, |(_, rest)| rest);
    let authority = rest.split(['/', '\\', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host_port.rsplit_once(':').map_or(host_port, |(host, _)| host)
}

fn is_acceptable_domain(domain: &str) -> bool {
    // A single trailing dot is the fully-qualified form of the same name.
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }
    labels.last().is_some_and(|tld| is_valid_tld(tld))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_valid_tld(tld: &str) -> bool {
    if let Some(rest) = tld.strip_prefix(PUNYCODE_PREFIX) {
        return !rest.is_empty();
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
