use crate::error::Result;

use super::one_of;

/// Check a value is 'permit' or 'deny'
pub fn is_permit_deny(value: &str) -> Result<&str> {
    one_of("is_permit_deny", value, &["permit", "deny"])
}

/// Check a value is 'permit', 'deny' or 'remark'
pub fn is_permit_deny_remark(value: &str) -> Result<&str> {
    one_of("is_permit_deny_remark", value, &["permit", "deny", "remark"])
}
