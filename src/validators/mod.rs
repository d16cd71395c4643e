//! Input validators for networking primitives.
//!
//! Every validator echoes its input back unchanged on success and fails
//! with `Error::Validation` at the first violated condition.

pub mod action;
pub mod general;
pub mod ip_address;
pub mod matches;
pub mod range;
pub mod string;

pub use action::{is_permit_deny, is_permit_deny_remark};
pub use general::{is_protocol, is_sequence_number};
pub use ip_address::{is_cidr_range, is_ipv4_host, is_ipv4_prefix, is_ipv4_subnet};
pub use matches::{is_eq_gt_lt_neq_range, is_le_ge};
pub use range::{is_bgp_as, is_ospf_area, is_private_bgp_as, is_public_bgp_as, is_vlan, is_vxlan_vni};
pub use string::{is_string_no_spaces, is_string_no_spaces_begin_end};

use crate::error::{Error, Result};
use crate::models::IntOrString;

/// Exact membership check against a small fixed set
pub(crate) fn one_of<'a>(operation: &'static str, value: &'a str, allowed: &[&str]) -> Result<&'a str> {
    if !allowed.contains(&value) {
        return Err(Error::validation(
            operation,
            value,
            format!("is not one of the following {:?}", allowed),
        ));
    }
    Ok(value)
}

/// Inclusive integer range check for int-or-string values
pub(crate) fn in_range<'a>(
    operation: &'static str,
    label: &str,
    value: &'a IntOrString,
    min: i64,
    max: i64,
) -> Result<&'a IntOrString> {
    let n = value
        .as_int()
        .ok_or_else(|| Error::validation(operation, value, "is not an integer"))?;

    if !(min..=max).contains(&n) {
        return Err(Error::validation(
            operation,
            value,
            format!("{} must be {}..{} but was {}", label, min, max, n),
        ));
    }

    Ok(value)
}
