//! Built-in FortiOS object types.

mod application_list;
mod emailfilter_blockallowlist;
mod firewall_proxyaddress;
mod firewall_shapingpolicy;
mod router_rip;
mod system_sessionttl;
mod system_snmp_sysinfo;
mod voip_profile;
mod vpnipsec_phase1interface;

use crate::error::CoreError;
use crate::schema::{Field, Schema};

pub use application_list::APPLICATION_LIST;
pub use emailfilter_blockallowlist::EMAILFILTER_BLOCKALLOWLIST;
pub use firewall_proxyaddress::FIREWALL_PROXYADDRESS;
pub use firewall_shapingpolicy::FIREWALL_SHAPINGPOLICY;
pub use router_rip::ROUTER_RIP;
pub use system_sessionttl::SYSTEM_SESSIONTTL;
pub use system_snmp_sysinfo::SYSTEM_SNMP_SYSINFO;
pub use voip_profile::VOIP_PROFILE;
pub use vpnipsec_phase1interface::VPNIPSEC_PHASE1INTERFACE;

pub(crate) const ENABLE_DISABLE: &[&str] = &["enable", "disable"];
pub(crate) const MAX_U32: i64 = 4_294_967_295;

/// `[{name}]` reference list entry.
pub(crate) const NAME_REF: &[Field] = &[Field::string("name", "name").length(0, 79)];
/// `[{id}]` reference list entry.
pub(crate) const ID_REF: &[Field] = &[Field::integer("id", "id").range(0, MAX_U32)];

static ALL: &[&Schema] = &[
    &APPLICATION_LIST,
    &EMAILFILTER_BLOCKALLOWLIST,
    &FIREWALL_PROXYADDRESS,
    &FIREWALL_SHAPINGPOLICY,
    &ROUTER_RIP,
    &SYSTEM_SESSIONTTL,
    &SYSTEM_SNMP_SYSINFO,
    &VOIP_PROFILE,
    &VPNIPSEC_PHASE1INTERFACE,
];

/// Every known object type, ordered by name.
pub fn all() -> &'static [&'static Schema] {
    ALL
}

pub fn lookup(name: &str) -> Option<&'static Schema> {
    ALL.iter().copied().find(|s| s.name == name)
}

/// Like [`lookup`], failing on unknown names.
pub fn require(name: &str) -> Result<&'static Schema, CoreError> {
    lookup(name).ok_or_else(|| CoreError::UnknownResource {
        name: name.to_owned(),
    })
}
