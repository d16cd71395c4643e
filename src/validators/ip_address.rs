use ipnet::{IpNet, Ipv4Net};
use std::net::IpAddr;

use crate::error::{Error, Result};
use crate::models::IntOrString;

use super::in_range;

/// Check a value is an IPv4 host address, e.g. 192.168.1.1
pub fn is_ipv4_host(value: &str) -> Result<&str> {
    let addr: IpAddr = value
        .parse()
        .map_err(|e| Error::validation("is_ipv4_host", value, format!("is not a valid ip address: {}", e)))?;

    if !addr.is_ipv4() {
        return Err(Error::validation("is_ipv4_host", value, "is not a valid ipv4 host address"));
    }

    Ok(value)
}

/// Check a value is an IPv4 prefix in CIDR form, e.g. 192.168.1.1/24.
///
/// Host bits may be set, but the input must already be in canonical
/// `address/length` form.
pub fn is_ipv4_prefix(value: &str) -> Result<&str> {
    if !value.contains('/') {
        return Err(Error::validation(
            "is_ipv4_prefix",
            value,
            "is not a valid ipv4 prefix address in CIDR format",
        ));
    }

    let net: IpNet = value
        .parse()
        .map_err(|e| Error::validation("is_ipv4_prefix", value, format!("is not a valid prefix: {}", e)))?;

    let IpNet::V4(v4) = net else {
        return Err(Error::validation("is_ipv4_prefix", value, "is not a valid ipv4 prefix address"));
    };

    if v4.to_string() != value {
        return Err(Error::validation("is_ipv4_prefix", value, "is not a valid ipv4 prefix address"));
    }

    Ok(value)
}

/// Strictly parse an IPv4 network: no host bits may be set
pub(crate) fn parse_ipv4_network(operation: &'static str, value: &str) -> Result<Ipv4Net> {
    let net: IpNet = value
        .parse()
        .map_err(|e| Error::validation(operation, value, format!("is not a valid network: {}", e)))?;

    let IpNet::V4(v4) = net else {
        return Err(Error::validation(operation, value, "is not a valid ipv4 subnet address"));
    };

    if v4.trunc() != v4 {
        return Err(Error::validation(operation, value, "has host bits set"));
    }

    Ok(v4)
}

/// Check a value is an IPv4 subnet, e.g. 192.168.1.0/24
pub fn is_ipv4_subnet(value: &str) -> Result<&str> {
    let net = parse_ipv4_network("is_ipv4_subnet", value)?;

    if net.to_string() != value {
        return Err(Error::validation("is_ipv4_subnet", value, "is not a valid ipv4 subnet address"));
    }

    Ok(value)
}

/// Check a value is a CIDR prefix length, 0..=32
pub fn is_cidr_range(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_cidr_range", "cidr", value, 0, 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ipv4_host() {
        for good in ["192.168.1.1", "172.16.1.25", "10.1.1.200"] {
            assert_eq!(is_ipv4_host(good).unwrap(), good);
        }
        for bad in [
            "1925.1.12.5",
            "192.1.12.5/32",
            "192.1.12.5 255.255.255.255",
            "2001:0000:130F:0000:0000:09C0:876A:130B",
        ] {
            assert!(is_ipv4_host(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_is_ipv4_prefix() {
        for good in ["192.168.1.1/24", "10.0.0.0/8", "192.168.1.1/32"] {
            assert_eq!(is_ipv4_prefix(good).unwrap(), good);
        }
        for bad in [
            "192.168.1.1",
            "10.1.0.0/255.255.255.0",
            "10.1.0.0/33",
            "2001:db8::/32",
            "10.1.0.0/08",
        ] {
            let err = is_ipv4_prefix(bad).unwrap_err();
            assert_eq!(err.kind(), "validation", "{}", bad);
        }
    }

    #[test]
    fn test_is_ipv4_subnet() {
        for good in ["192.168.1.0/24", "172.16.0.0/18", "10.1.0.0/16", "192.1.12.5/32", "0.0.0.0/0"] {
            assert_eq!(is_ipv4_subnet(good).unwrap(), good);
        }
        for bad in [
            "1925.1.12.5/24",
            "192.1.12.5 255.255.255.255",
            "2001:0000:130F:0000:0000:09C0:876A:130B",
            "10.1.0.0",
            "10.1.0.1/16",
        ] {
            assert!(is_ipv4_subnet(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_subnet_stable_under_revalidation() {
        for value in ["192.168.1.0/24", "172.16.0.0/18", "10.0.0.0/8", "1.2.3.4/32"] {
            let accepted = is_ipv4_subnet(value).unwrap().to_string();
            assert_eq!(is_ipv4_subnet(&accepted).unwrap(), accepted);
        }
    }

    #[test]
    fn test_is_cidr_range_boundaries() {
        for n in 0..=32 {
            let int = IntOrString::Int(n);
            assert_eq!(is_cidr_range(&int).unwrap(), &int);
            let s = IntOrString::Str(n.to_string());
            assert_eq!(is_cidr_range(&s).unwrap(), &s);
        }
        for bad in [IntOrString::Int(-1), IntOrString::Int(33), "-1".into(), "33".into(), "x".into()] {
            assert!(is_cidr_range(&bad).is_err(), "{} should be rejected", bad);
        }
    }
}
