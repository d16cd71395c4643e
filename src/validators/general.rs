use crate::error::{Error, Result};
use crate::models::IntOrString;

use super::one_of;

/// Protocols accepted in ACL entries
pub const PROTOCOLS: &[&str] = &["icmp", "ip", "tcp", "udp"];

/// Check a value is an integer usable as a sequence number
pub fn is_sequence_number(value: &IntOrString) -> Result<&IntOrString> {
    value
        .as_int()
        .map(|_| value)
        .ok_or_else(|| Error::validation("is_sequence_number", value, "is not a valid sequence number"))
}

/// Check a value is a valid protocol
pub fn is_protocol(value: &str) -> Result<&str> {
    one_of("is_protocol", value, PROTOCOLS)
}
