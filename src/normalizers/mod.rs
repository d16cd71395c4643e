//! Vendor normalizers: canonical values in, vendor configuration syntax out.

pub mod conversion;
pub mod network_os;

pub use conversion::{
    cidr_to_inverse_mask, eos_extended_acl_ipv4_subnet_normalizer, eos_port_normalizer,
    eos_standard_acl_ipv4_subnet_normalizer, extended_acl_ipv4_subnet_normalizer,
    ios_extended_acl_ipv4_subnet_normalizer, ios_standard_acl_ipv4_subnet_normalizer,
    iosxr_extended_acl_ipv4_subnet_normalizer, iosxr_standard_acl_ipv4_subnet_normalizer,
    port_or_ports, standard_acl_ipv4_subnet_normalizer, AclKind,
};
pub use network_os::{network_os_normalize, NetworkOs};
