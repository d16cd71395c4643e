//! Template filters exposing the validators and normalizers to Tera.
//!
//! Filters raise the core `Error` wrapped in a `tera::Error` chain so the
//! renderer can report the original failure kind.

use std::collections::HashMap;
use tera::{Tera, Value};

use crate::error::{from_tera, Error, Result};
use crate::models::IntOrString;
use crate::normalizers;
use crate::validators;

/// Signature shared by every registered filter
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// Filter name → implementation
pub const FILTERS: &[(&str, FilterFn)] = &[
    ("ipv4_host", ipv4_host),
    ("ipv4_subnet", ipv4_subnet),
    ("standard_acl_ipv4_subnet_normalizer", standard_acl_ipv4_subnet_normalizer),
    ("extended_acl_ipv4_subnet_normalizer", extended_acl_ipv4_subnet_normalizer),
    ("protocol", protocol),
    ("port_match", port_match),
    ("port_or_ports", port_or_ports),
    ("acl_append_options_to_end", acl_append_options_to_end),
    ("permit_deny_remark", permit_deny_remark),
    ("sequence_number", sequence_number),
    ("required_string_no_spaces", required_string_no_spaces),
    ("required_string_no_spaces_begin_or_end", required_string_no_spaces_begin_or_end),
    ("permit_deny", permit_deny),
    ("le_ge", le_ge),
    ("cidr_range", cidr_range),
];

/// Options allowed at the end of an ACL entry
const ACL_END_OPTIONS: &[&str] = &["log"];

/// Register every filter on a Tera instance
pub fn register_filters(tera: &mut Tera) {
    for (name, filter) in FILTERS {
        tera.register_filter(name, *filter);
    }
}

/// Names of all registered filters
pub fn filter_names() -> Vec<&'static str> {
    FILTERS.iter().map(|(name, _)| *name).collect()
}

/// Invoke a filter by name outside of a template
pub fn apply_filter(name: &str, value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
    let (_, filter) = FILTERS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| Error::validation("apply_filter", name, "is not a known filter"))?;

    filter(value, args).map_err(|e| from_tera(e, name))
}

fn to_tera(err: Error) -> tera::Error {
    tera::Error::chain(err.to_string(), err)
}

fn as_str<'a>(filter: &'static str, value: &'a Value) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| to_tera(Error::validation(filter, value, "must be a string")))
}

fn as_int_or_string(filter: &'static str, value: &Value) -> tera::Result<IntOrString> {
    IntOrString::from_json(value)
        .ok_or_else(|| to_tera(Error::validation(filter, value, "must be an integer or a string")))
}

fn arg<'a>(filter: &'static str, args: &'a HashMap<String, Value>, name: &str) -> tera::Result<&'a Value> {
    args.get(name)
        .ok_or_else(|| to_tera(Error::validation(filter, name, "required filter argument is missing")))
}

/// Shared body for filters that validate a string and echo it back
fn echo_str(
    filter: &'static str,
    value: &Value,
    validate: fn(&str) -> Result<&str>,
) -> tera::Result<Value> {
    validate(as_str(filter, value)?).map_err(to_tera)?;
    Ok(value.clone())
}

/// Shared body for filters that validate an int-or-string and echo it back
fn echo_int_or_string(
    filter: &'static str,
    value: &Value,
    validate: fn(&IntOrString) -> Result<&IntOrString>,
) -> tera::Result<Value> {
    validate(&as_int_or_string(filter, value)?).map_err(to_tera)?;
    Ok(value.clone())
}

pub fn ipv4_host(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("ipv4_host", value, validators::is_ipv4_host)
}

pub fn ipv4_subnet(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("ipv4_subnet", value, validators::is_ipv4_subnet)
}

pub fn standard_acl_ipv4_subnet_normalizer(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let filter = "standard_acl_ipv4_subnet_normalizer";
    let nos = as_str(filter, arg(filter, args, "nos")?)?;
    normalizers::standard_acl_ipv4_subnet_normalizer(as_str(filter, value)?, nos)
        .map(Value::String)
        .map_err(to_tera)
}

pub fn extended_acl_ipv4_subnet_normalizer(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let filter = "extended_acl_ipv4_subnet_normalizer";
    let nos = as_str(filter, arg(filter, args, "nos")?)?;
    normalizers::extended_acl_ipv4_subnet_normalizer(as_str(filter, value)?, nos)
        .map(Value::String)
        .map_err(to_tera)
}

pub fn protocol(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("protocol", value, validators::is_protocol)
}

pub fn port_match(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("port_match", value, validators::is_eq_gt_lt_neq_range)
}

pub fn port_or_ports(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let filter = "port_or_ports";
    let port_match = as_str(filter, arg(filter, args, "port_match")?)?;
    let nos = as_str(filter, arg(filter, args, "nos")?)?;
    normalizers::port_or_ports(&as_int_or_string(filter, value)?, port_match, nos)
        .map(|v| v.to_json())
        .map_err(to_tera)
}

/// Python-style truthiness: null, false, 0, "" and empty collections are empty
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

pub fn acl_append_options_to_end(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let filter = "acl_append_options_to_end";

    if is_empty_value(value) {
        return Ok(Value::String(String::new()));
    }

    let Value::Array(items) = value else {
        return Err(to_tera(Error::validation(filter, value, "if supplied must be a list")));
    };

    let mut options = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(option) if ACL_END_OPTIONS.contains(&option) => options.push(option),
            _ => {
                return Err(to_tera(Error::validation(
                    filter,
                    item,
                    format!("is not a valid option, the valid options are {:?}", ACL_END_OPTIONS),
                )))
            }
        }
    }

    Ok(Value::String(format!(" {}", options.join(" "))))
}

pub fn permit_deny_remark(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("permit_deny_remark", value, validators::is_permit_deny_remark)
}

pub fn permit_deny(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("permit_deny", value, validators::is_permit_deny)
}

pub fn sequence_number(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_int_or_string("sequence_number", value, validators::is_sequence_number)
}

pub fn required_string_no_spaces(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("required_string_no_spaces", value, validators::is_string_no_spaces)
}

pub fn required_string_no_spaces_begin_or_end(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str(
        "required_string_no_spaces_begin_or_end",
        value,
        validators::is_string_no_spaces_begin_end,
    )
}

pub fn le_ge(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_str("le_ge", value, validators::is_le_ge)
}

pub fn cidr_range(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    echo_int_or_string("cidr_range", value, validators::is_cidr_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_args() -> HashMap<String, Value> {
        HashMap::new()
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    #[test]
    fn test_filter_names_unique() {
        let mut names = filter_names();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 15);
    }

    #[test]
    fn test_echo_filters_preserve_type() {
        assert_eq!(cidr_range(&json!(32), &no_args()).unwrap(), json!(32));
        assert_eq!(cidr_range(&json!("0"), &no_args()).unwrap(), json!("0"));
        assert_eq!(sequence_number(&json!(6589654), &no_args()).unwrap(), json!(6589654));
        assert_eq!(sequence_number(&json!("123123"), &no_args()).unwrap(), json!("123123"));
        assert!(cidr_range(&json!(33), &no_args()).is_err());
        assert!(sequence_number(&json!("nope"), &no_args()).is_err());
    }

    #[test]
    fn test_string_filters() {
        assert_eq!(ipv4_host(&json!("10.1.1.200"), &no_args()).unwrap(), json!("10.1.1.200"));
        assert!(ipv4_host(&json!(10), &no_args()).is_err());
        assert_eq!(protocol(&json!("udp"), &no_args()).unwrap(), json!("udp"));
        assert_eq!(port_match(&json!("range"), &no_args()).unwrap(), json!("range"));
        assert_eq!(permit_deny(&json!("deny"), &no_args()).unwrap(), json!("deny"));
        assert_eq!(le_ge(&json!("ge"), &no_args()).unwrap(), json!("ge"));
        assert!(required_string_no_spaces(&json!("a b"), &no_args()).is_err());
    }

    #[test]
    fn test_subnet_normalizer_filters() {
        let v = standard_acl_ipv4_subnet_normalizer(&json!("192.168.1.1/32"), &args(&[("nos", "ios")])).unwrap();
        assert_eq!(v, json!("192.168.1.1"));
        let v = extended_acl_ipv4_subnet_normalizer(&json!("192.168.1.1/32"), &args(&[("nos", "ios")])).unwrap();
        assert_eq!(v, json!("host 192.168.1.1"));
        assert!(standard_acl_ipv4_subnet_normalizer(&json!("10.0.0.0/8"), &no_args()).is_err());
    }

    #[test]
    fn test_port_or_ports_filter() {
        let a = args(&[("port_match", "eq"), ("nos", "ios")]);
        assert_eq!(port_or_ports(&json!("1000"), &a).unwrap(), json!(1000));
        let a = args(&[("port_match", "range"), ("nos", "ios")]);
        assert_eq!(port_or_ports(&json!("1000,2000"), &a).unwrap(), json!("1000 2000"));
        let a = args(&[("port_match", "eq"), ("nos", "eos")]);
        assert_eq!(port_or_ports(&json!(111), &a).unwrap(), json!("sunrpc"));
        assert_eq!(port_or_ports(&json!(1225), &a).unwrap(), json!(1225));
    }

    #[test]
    fn test_acl_append_options_to_end() {
        assert_eq!(acl_append_options_to_end(&Value::Null, &no_args()).unwrap(), json!(""));
        assert_eq!(acl_append_options_to_end(&json!([]), &no_args()).unwrap(), json!(""));
        assert_eq!(acl_append_options_to_end(&json!(["log"]), &no_args()).unwrap(), json!(" log"));
        assert!(acl_append_options_to_end(&json!(["other"]), &no_args()).is_err());
        assert!(acl_append_options_to_end(&json!("other"), &no_args()).is_err());
    }

    #[test]
    fn test_apply_filter_keeps_error_kind() {
        let err = apply_filter("protocol", &json!("gre"), &no_args()).unwrap_err();
        assert_eq!(err.kind(), "validation");

        let a = args(&[("port_match", "range"), ("nos", "ios")]);
        let err = apply_filter("port_or_ports", &json!("2000,1000"), &a).unwrap_err();
        assert_eq!(err.kind(), "normalization");

        let err = apply_filter("no_such_filter", &json!("x"), &no_args()).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_filters_in_template() {
        let mut tera = Tera::default();
        register_filters(&mut tera);
        tera.add_raw_template(
            "acl",
            "{{ seq | sequence_number }} {{ action | permit_deny }} {{ src | standard_acl_ipv4_subnet_normalizer(nos=os) }}{{ opts | acl_append_options_to_end }}",
        )
        .unwrap();

        let mut ctx = tera::Context::new();
        ctx.insert("seq", &10);
        ctx.insert("action", "permit");
        ctx.insert("src", "10.0.0.0/8");
        ctx.insert("os", "ios");
        ctx.insert("opts", &vec!["log"]);

        assert_eq!(tera.render("acl", &ctx).unwrap(), "10 permit 10.0.0.0 0.255.255.255 log");
    }
}
