use crate::error::{Error, Result};
use crate::models::IntOrString;
use crate::validators::ip_address::parse_ipv4_network;
use crate::validators::{is_eq_gt_lt_neq_range, is_ipv4_prefix, is_ipv4_subnet};

use super::network_os::{network_os_normalize, NetworkOs};

/// Named EOS services and their well-known ports
const EOS_NAMED_PORTS: &[(&str, i64)] = &[("nfs", 2049), ("sunrpc", 111), ("microsoft-ds", 445)];

/// Prefix length of a `address/length` value
fn prefix_length(operation: &'static str, value: &str) -> Result<(String, u8)> {
    let (address, length) = value
        .split_once('/')
        .ok_or_else(|| Error::normalization(operation, value, "is not in CIDR format"))?;
    let length = length
        .parse::<u8>()
        .map_err(|e| Error::normalization(operation, value, format!("invalid prefix length: {}", e)))?;
    Ok((address.to_string(), length))
}

/// Convert CIDR notation to network + inverse mask,
/// e.g. 192.168.1.0/24 -> 192.168.1.0 0.0.0.255
pub fn cidr_to_inverse_mask(value: &str) -> Result<String> {
    is_ipv4_subnet(value)?;
    let net = parse_ipv4_network("cidr_to_inverse_mask", value)?;
    Ok(format!("{} {}", net.network(), net.hostmask()))
}

/// `/32` becomes `host <addr>`, anything else network + inverse mask
fn host_keyword_or_inverse_mask(operation: &'static str, value: &str) -> Result<String> {
    let (address, length) = prefix_length(operation, value)?;
    if length == 32 {
        Ok(format!("host {}", address))
    } else {
        cidr_to_inverse_mask(value)
    }
}

/// Cisco IOS standard ACL subnet: /32 is the bare address
pub fn ios_standard_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    let operation = "ios_standard_acl_ipv4_subnet_normalizer";
    let (address, length) = prefix_length(operation, value)?;
    if length == 32 {
        Ok(address)
    } else {
        cidr_to_inverse_mask(value)
    }
}

/// Cisco IOS extended ACL subnet
pub fn ios_extended_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    host_keyword_or_inverse_mask("ios_extended_acl_ipv4_subnet_normalizer", value)
}

/// Cisco IOS-XR standard ACL subnet
pub fn iosxr_standard_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    host_keyword_or_inverse_mask("iosxr_standard_acl_ipv4_subnet_normalizer", value)
}

/// Cisco IOS-XR extended ACL subnet
pub fn iosxr_extended_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    host_keyword_or_inverse_mask("iosxr_extended_acl_ipv4_subnet_normalizer", value)
}

/// Arista EOS keeps CIDR notation; only /32 becomes `host <addr>`
fn eos_acl_ipv4_subnet(operation: &'static str, value: &str) -> Result<String> {
    let (address, length) = prefix_length(operation, value)?;
    if length == 32 {
        Ok(format!("host {}", address))
    } else {
        Ok(value.to_string())
    }
}

/// Arista EOS standard ACL subnet
pub fn eos_standard_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    eos_acl_ipv4_subnet("eos_standard_acl_ipv4_subnet_normalizer", value)
}

/// Arista EOS extended ACL subnet
pub fn eos_extended_acl_ipv4_subnet_normalizer(value: &str) -> Result<String> {
    eos_acl_ipv4_subnet("eos_extended_acl_ipv4_subnet_normalizer", value)
}

/// Arista EOS named/numbered ports.
///
/// Known names pass through, known numbers become their name, and
/// everything else is returned unchanged. Never fails.
pub fn eos_port_normalizer(value: &IntOrString) -> IntOrString {
    if let Some(name) = value.as_str() {
        if EOS_NAMED_PORTS.iter().any(|(n, _)| *n == name) {
            return value.clone();
        }
    }

    value
        .as_int()
        .and_then(|port| EOS_NAMED_PORTS.iter().find(|(_, p)| *p == port))
        .map(|(name, _)| IntOrString::Str((*name).to_string()))
        .unwrap_or_else(|| value.clone())
}

/// Which ACL flavour a subnet is being normalized for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclKind {
    Standard,
    Extended,
}

impl NetworkOs {
    /// Vendor dispatch for an already validated ACL subnet
    pub fn acl_ipv4_subnet(&self, kind: AclKind, value: &str) -> Result<String> {
        match (self, kind) {
            (NetworkOs::Ios, AclKind::Standard) => ios_standard_acl_ipv4_subnet_normalizer(value),
            (NetworkOs::Ios, AclKind::Extended) => ios_extended_acl_ipv4_subnet_normalizer(value),
            (NetworkOs::IosXr, AclKind::Standard) => iosxr_standard_acl_ipv4_subnet_normalizer(value),
            (NetworkOs::IosXr, AclKind::Extended) => iosxr_extended_acl_ipv4_subnet_normalizer(value),
            (NetworkOs::Eos, AclKind::Standard) => eos_standard_acl_ipv4_subnet_normalizer(value),
            (NetworkOs::Eos, AclKind::Extended) => eos_extended_acl_ipv4_subnet_normalizer(value),
            _ => Ok(value.to_string()),
        }
    }
}

fn acl_ipv4_subnet_normalizer(operation: &'static str, kind: AclKind, value: &str, nos: &str) -> Result<String> {
    if value == "any" {
        return Ok(value.to_string());
    }

    is_ipv4_prefix(value)?;
    parse_ipv4_network(operation, value).map_err(|e| match e {
        Error::Validation { value, reason, .. } => Error::Normalization { operation, value, reason },
        other => other,
    })?;

    network_os_normalize(nos)?.acl_ipv4_subnet(kind, value)
}

/// Normalize a standard ACL subnet for the given network OS
pub fn standard_acl_ipv4_subnet_normalizer(value: &str, nos: &str) -> Result<String> {
    acl_ipv4_subnet_normalizer("standard_acl_ipv4_subnet_normalizer", AclKind::Standard, value, nos)
}

/// Normalize an extended ACL subnet for the given network OS
pub fn extended_acl_ipv4_subnet_normalizer(value: &str, nos: &str) -> Result<String> {
    acl_ipv4_subnet_normalizer("extended_acl_ipv4_subnet_normalizer", AclKind::Extended, value, nos)
}

/// Validate a port or port range against its match operator.
///
/// `range` takes `"low,high"` and returns `"low high"`; other operators
/// take a single port, named for EOS and numeric everywhere else.
pub fn port_or_ports(value: &IntOrString, port_match: &str, nos: &str) -> Result<IntOrString> {
    let operation = "port_or_ports";
    let network_os = network_os_normalize(nos)?;
    let port_match = is_eq_gt_lt_neq_range(port_match)?;

    if port_match == "range" {
        let raw = value
            .as_str()
            .ok_or_else(|| Error::normalization(operation, value, "range must be two ports separated by a comma"))?;

        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 2 {
            return Err(Error::normalization(operation, value, "port or ports is not valid"));
        }

        let ports = parts
            .iter()
            .map(|p| p.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::normalization(operation, value, format!("port is not an integer: {}", e)))?;

        if ports[0] > ports[1] {
            return Err(Error::normalization(
                operation,
                value,
                "port or ports is not valid, first port greater than second",
            ));
        }

        return Ok(IntOrString::Str(format!("{} {}", ports[0], ports[1])));
    }

    match network_os {
        NetworkOs::Eos => Ok(eos_port_normalizer(value)),
        _ => value
            .as_int()
            .map(IntOrString::Int)
            .ok_or_else(|| Error::normalization(operation, value, "port is not an integer")),
    }
}
