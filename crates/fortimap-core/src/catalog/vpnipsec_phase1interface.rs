// vpn.ipsec phase1-interface: route-based IPsec phase 1 tunnels.

use super::{ENABLE_DISABLE, NAME_REF};
use crate::schema::{Field, ObjectKind, Schema};
use crate::version::{VersionOp, VersionRange};

/// `authusrgrp` became a list of group references in 7.4.1.
const AUTHUSRGRP_AS_LIST: VersionRange = VersionRange::new(VersionOp::Ge, &["7.4.1"]);

const BACKUP_GATEWAY: &[Field] = &[Field::string("address", "address").length(0, 79)];

const FIELDS: &[Field] = &[
    Field::string("name", "name").length(0, 15),
    Field::string("type", "type").one_of(&["static", "dynamic", "ddns"]),
    Field::string("interface", "interface").length(0, 35),
    Field::string("ip_version", "ip-version").one_of(&["4", "6"]),
    Field::string("ike_version", "ike-version").one_of(&["1", "2"]),
    Field::string("local_gw", "local-gw"),
    Field::string("remote_gw", "remote-gw"),
    Field::string("remotegw_ddns", "remotegw-ddns").length(0, 63),
    Field::integer("keylife", "keylife").range(120, 172_800),
    Field::string("proposal", "proposal"),
    Field::string("authmethod", "authmethod").one_of(&["psk", "signature"]),
    Field::string("mode", "mode").one_of(&["aggressive", "main"]),
    Field::string("peertype", "peertype").one_of(&["any", "one", "dialup", "peer", "peergrp"]),
    Field::string("psksecret", "psksecret").sensitive(),
    Field::set("certificate", "certificate", NAME_REF),
    Field::string("authusrgrp", "authusrgrp").split(',', "name", AUTHUSRGRP_AS_LIST),
    Field::list("backup_gateway", "backup-gateway", BACKUP_GATEWAY).sorted("address"),
    Field::string("dpd", "dpd").one_of(&["disable", "on-idle", "on-demand"]),
    Field::integer("dpd_retrycount", "dpd-retrycount").range(0, 10),
    Field::integer("dpd_retryinterval", "dpd-retryinterval").range(1, 3600),
    Field::string("dhgrp", "dhgrp"),
    Field::string("nattraversal", "nattraversal").one_of(&["enable", "disable", "forced"]),
    Field::string("net_device", "net-device").one_of(ENABLE_DISABLE),
    Field::string("add_route", "add-route").one_of(ENABLE_DISABLE),
    Field::string("auto_negotiate", "auto-negotiate").one_of(ENABLE_DISABLE),
    Field::string("comments", "comments").length(0, 255),
];

pub static VPNIPSEC_PHASE1INTERFACE: Schema = Schema {
    name: "vpnipsec_phase1interface",
    label: "VpnIpsecPhase1Interface",
    path: "vpn.ipsec/phase1-interface",
    kind: ObjectKind::Table { mkey: "name" },
    description: "IPsec phase 1 settings for a route-based VPN tunnel interface.",
    fields: FIELDS,
};
