use crate::error::Result;

use super::one_of;

/// Prefix-list length match operators
pub const LE_GE: &[&str] = &["le", "ge"];

/// Port match operators
pub const PORT_MATCH: &[&str] = &["eq", "gt", "lt", "neq", "range"];

/// Check a value is 'le' or 'ge'
pub fn is_le_ge(value: &str) -> Result<&str> {
    one_of("is_le_ge", value, LE_GE)
}

/// Check a value is 'eq', 'gt', 'lt', 'neq' or 'range'
pub fn is_eq_gt_lt_neq_range(value: &str) -> Result<&str> {
    one_of("is_eq_gt_lt_neq_range", value, PORT_MATCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_le_ge() {
        assert_eq!(is_le_ge("le").unwrap(), "le");
        assert_eq!(is_le_ge("ge").unwrap(), "ge");
        assert!(is_le_ge("other ").is_err());
        assert!(is_le_ge("LE").is_err());
    }

    #[test]
    fn test_is_eq_gt_lt_neq_range() {
        for value in PORT_MATCH {
            assert_eq!(is_eq_gt_lt_neq_range(value).unwrap(), *value);
        }
        assert!(is_eq_gt_lt_neq_range("other").is_err());
        assert!(is_eq_gt_lt_neq_range("eq ").is_err());
    }
}
