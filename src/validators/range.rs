use crate::error::Result;
use crate::models::IntOrString;

use super::in_range;

/// BGP AS number, 1..=65535
pub fn is_bgp_as(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_bgp_as", "BGP AS", value, 1, 65535)
}

/// Public BGP AS number, 1..=64511
pub fn is_public_bgp_as(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_public_bgp_as", "Public BGP AS", value, 1, 64511)
}

/// Private BGP AS number, 64512..=65535
pub fn is_private_bgp_as(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_private_bgp_as", "Private BGP AS", value, 64512, 65535)
}

/// OSPF area number, 0..=65535
pub fn is_ospf_area(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_ospf_area", "OSPF Area", value, 0, 65535)
}

/// VLAN ID, 1..=4094
pub fn is_vlan(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_vlan", "VLAN", value, 1, 4094)
}

/// VxLAN VNI, 1..=16777215
pub fn is_vxlan_vni(value: &IntOrString) -> Result<&IntOrString> {
    in_range("is_vxlan_vni", "VxLAN VNI", value, 1, 16_777_215)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Validator = fn(&IntOrString) -> Result<&IntOrString>;

    #[test]
    fn test_range_boundaries() {
        let table: &[(Validator, i64, i64)] = &[
            (is_bgp_as, 1, 65535),
            (is_public_bgp_as, 1, 64511),
            (is_private_bgp_as, 64512, 65535),
            (is_ospf_area, 0, 65535),
            (is_vlan, 1, 4094),
            (is_vxlan_vni, 1, 16_777_215),
        ];

        for (validator, min, max) in table {
            for n in [*min, *max] {
                let int = IntOrString::Int(n);
                assert_eq!(validator(&int).unwrap(), &int);
                let s = IntOrString::Str(n.to_string());
                assert_eq!(validator(&s).unwrap(), &s);
            }
            for n in [*min - 1, *max + 1] {
                assert!(validator(&IntOrString::Int(n)).is_err(), "{} should be rejected", n);
                assert!(validator(&IntOrString::Str(n.to_string())).is_err());
            }
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = is_vlan(&"ten".into()).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_error_message_names_range() {
        let err = is_vlan(&IntOrString::Int(4095)).unwrap_err();
        assert!(err.to_string().contains("VLAN must be 1..4094 but was 4095"));
    }
}
