//! Network configuration checks for VNI work orders.
//!
//! Address math is done on big-endian `u32` values obtained from
//! [`std::net::Ipv4Addr`], so there is no sign extension to get wrong: a
//! `/0` prefix yields mask `0`, not `0xFFFFFFFF`.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// Severity of a validation verdict or notification, matching the alert
/// levels the console renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Verdict of [`validate_network_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkCheck {
    pub is_valid: bool,
    pub message: String,
    pub severity: Severity,
}

impl NetworkCheck {
    fn error(message: String) -> Self {
        Self {
            is_valid: false,
            message,
            severity: Severity::Error,
        }
    }
}

fn parse_ipv4(s: &str) -> Option<u32> {
    s.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Splits `a.b.c.d/prefix` into address and prefix length, rejecting
/// prefixes outside [0, 32]. The address part is parsed separately so a
/// bad prefix and a bad address produce their own messages.
fn parse_prefix(cidr: &str) -> Option<(&str, u8)> {
    let (addr, prefix) = cidr.split_once('/')?;
    let prefix = prefix.parse::<u8>().ok()?;
    (prefix <= 32).then_some((addr, prefix))
}

fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) }
}

/// Checks that gateway and the usable range all live inside the declared
/// CIDR block, that the range is ordered, and that the gateway sits
/// outside the range.
///
/// Returns `None` while any of the four inputs is still empty; an absent
/// verdict is not a failure. Re-run on every change to any input.
pub fn validate_network_config(
    gateway: &str,
    first_ip: &str,
    last_ip: &str,
    cidr: &str,
) -> Option<NetworkCheck> {
    if gateway.is_empty() || first_ip.is_empty() || last_ip.is_empty() || cidr.is_empty() {
        return None;
    }

    let Some((network_addr, prefix)) = parse_prefix(cidr) else {
        return Some(NetworkCheck::error(
            "Invalid CIDR format. Please use format like 192.168.1.0/24".into(),
        ));
    };

    let parsed = (
        parse_ipv4(gateway),
        parse_ipv4(first_ip),
        parse_ipv4(last_ip),
        parse_ipv4(network_addr),
    );
    let (Some(gateway_num), Some(first), Some(last), Some(network_num)) = parsed else {
        return Some(NetworkCheck::error(
            "Invalid IP address format. Please check your IP addresses.".into(),
        ));
    };

    let mask = prefix_mask(prefix);
    let expected_network = network_num & mask;

    if gateway_num & mask != expected_network {
        return Some(NetworkCheck::error(format!(
            "Gateway {gateway} is not in the network {cidr}. Gateway must be in the same network as the IP range."
        )));
    }

    if first & mask != expected_network || last & mask != expected_network {
        return Some(NetworkCheck::error(format!(
            "IP range {first_ip} - {last_ip} is not in the network {cidr}. All IPs must be in the same network."
        )));
    }

    if first > last {
        return Some(NetworkCheck::error(
            "First IP must be less than or equal to Last IP.".into(),
        ));
    }

    if gateway_num >= first && gateway_num <= last {
        return Some(NetworkCheck {
            is_valid: false,
            message: format!(
                "Gateway {gateway} is within the IP range {first_ip} - {last_ip}. Gateway should be outside the IP range."
            ),
            severity: Severity::Warning,
        });
    }

    Some(NetworkCheck {
        is_valid: true,
        message: format!("Network configuration is valid. All IPs are in the network {cidr}."),
        severity: Severity::Success,
    })
}

/// Number of addresses in the inclusive range `[first_ip, last_ip]`.
/// Zero when the range is reversed or either address does not parse.
pub fn ip_count(first_ip: &str, last_ip: &str) -> u32 {
    match (parse_ipv4(first_ip), parse_ipv4(last_ip)) {
        (Some(first), Some(last)) if last >= first => (last - first).saturating_add(1),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_configuration() {
        let check =
            validate_network_config("192.168.1.254", "192.168.1.10", "192.168.1.20", "192.168.1.0/24")
                .unwrap();
        assert!(check.is_valid);
        assert_eq!(check.severity, Severity::Success);
        assert!(check.message.contains("192.168.1.0/24"));
    }

    #[test]
    fn test_gateway_outside_network_is_error() {
        let check =
            validate_network_config("10.0.0.1", "192.168.1.10", "192.168.1.20", "192.168.1.0/24")
                .unwrap();
        assert!(!check.is_valid);
        assert_eq!(check.severity, Severity::Error);
        assert!(check.message.contains("Gateway 10.0.0.1"));
    }

    #[test]
    fn test_range_outside_network_is_error() {
        let check =
            validate_network_config("192.168.1.254", "10.0.0.10", "10.0.0.20", "192.168.1.0/24")
                .unwrap();
        assert!(!check.is_valid);
        assert!(check.message.contains("IP range"));
    }

    #[test]
    fn test_gateway_inside_range_is_warning_not_error() {
        let check =
            validate_network_config("192.168.1.15", "192.168.1.10", "192.168.1.20", "192.168.1.0/24")
                .unwrap();
        assert!(!check.is_valid);
        assert_eq!(check.severity, Severity::Warning);
    }

    #[test]
    fn test_reversed_range_is_error() {
        let check =
            validate_network_config("192.168.1.254", "192.168.1.20", "192.168.1.10", "192.168.1.0/24")
                .unwrap();
        assert_eq!(check.severity, Severity::Error);
        assert!(check.message.contains("First IP"));
    }

    #[test]
    fn test_bad_prefix_and_bad_octets() {
        let check = validate_network_config("192.168.1.1", "192.168.1.2", "192.168.1.3", "192.168.1.0/33")
            .unwrap();
        assert!(check.message.contains("CIDR"));

        let check = validate_network_config("192.168.1.256", "192.168.1.2", "192.168.1.3", "192.168.1.0/24")
            .unwrap();
        assert!(check.message.contains("IP address format"));

        let check = validate_network_config("192.168.1", "192.168.1.2", "192.168.1.3", "192.168.1.0/24")
            .unwrap();
        assert!(check.message.contains("IP address format"));
    }

    #[test]
    fn test_empty_input_yields_no_verdict() {
        assert!(validate_network_config("", "192.168.1.10", "192.168.1.20", "192.168.1.0/24").is_none());
        assert!(validate_network_config("192.168.1.1", "192.168.1.10", "192.168.1.20", "").is_none());
    }

    #[test]
    fn test_prefix_zero_has_empty_mask() {
        // Everything is inside 0.0.0.0/0; only range ordering can fail.
        let check = validate_network_config("10.0.0.1", "172.16.0.1", "192.168.0.1", "0.0.0.0/0").unwrap();
        assert!(check.is_valid);

        let check = validate_network_config("10.0.0.5", "10.0.0.4", "10.0.0.6", "10.0.0.4/32");
        assert!(check.is_some());
    }

    #[test]
    fn test_ip_count() {
        assert_eq!(ip_count("10.0.0.10", "10.0.0.10"), 1);
        assert_eq!(ip_count("10.0.0.10", "10.0.0.20"), 11);
        assert_eq!(ip_count("10.0.0.20", "10.0.0.10"), 0);
        assert_eq!(ip_count("not-an-ip", "10.0.0.10"), 0);
        assert_eq!(ip_count("", ""), 0);
    }

    #[test]
    fn test_ip_count_full_range_saturates() {
        assert_eq!(ip_count("0.0.0.0", "255.255.255.255"), u32::MAX);
    }
}
