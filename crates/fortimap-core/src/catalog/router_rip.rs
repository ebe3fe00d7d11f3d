// router rip: global RIP settings, one per vdom.

use super::ENABLE_DISABLE;
use crate::schema::{Field, ObjectKind, Schema};

const MAX_I32: i64 = 2_147_483_647;
const DIRECTION: &[&str] = &["in", "out"];

const DISTANCE: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("prefix", "prefix").subnet(),
    Field::integer("distance", "distance").range(1, 255),
    Field::string("access_list", "access-list").length(0, 35),
];

const DISTRIBUTE_LIST: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::string("direction", "direction").one_of(DIRECTION),
    Field::string("listname", "listname").length(0, 35),
    Field::string("interface", "interface").length(0, 15),
];

const NEIGHBOR: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("ip", "ip"),
];

const NETWORK: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("prefix", "prefix").subnet(),
];

const OFFSET_LIST: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::string("direction", "direction").one_of(DIRECTION),
    Field::string("access_list", "access-list").length(0, 35),
    Field::integer("offset", "offset").range(1, 16),
    Field::string("interface", "interface").length(0, 15),
];

const PASSIVE_INTERFACE: &[Field] = &[Field::string("name", "name").length(0, 79)];

const REDISTRIBUTE: &[Field] = &[
    Field::string("name", "name").length(0, 35),
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::integer("metric", "metric").range(1, 16),
    Field::string("routemap", "routemap").length(0, 35),
];

const INTERFACE: &[Field] = &[
    Field::string("name", "name").length(0, 35),
    Field::string("auth_keychain", "auth-keychain").length(0, 35),
    Field::string("auth_mode", "auth-mode").one_of(&["none", "text", "md5"]),
    Field::string("auth_string", "auth-string").length(0, 16).sensitive(),
    Field::string("receive_version", "receive-version"),
    Field::string("send_version", "send-version"),
    Field::string("send_version2_broadcast", "send-version2-broadcast").one_of(ENABLE_DISABLE),
    Field::string("split_horizon_status", "split-horizon-status").one_of(ENABLE_DISABLE),
    Field::string("split_horizon", "split-horizon").one_of(&["poisoned", "regular"]),
    Field::integer("flags", "flags").range(0, 255),
];

const FIELDS: &[Field] = &[
    Field::string("default_information_originate", "default-information-originate")
        .one_of(ENABLE_DISABLE),
    Field::integer("default_metric", "default-metric").range(1, 16),
    Field::integer("max_out_metric", "max-out-metric").range(0, 15),
    Field::integer("recv_buffer_size", "recv-buffer-size").range(8129, MAX_I32),
    Field::list("distance", "distance", DISTANCE)
        .natural_sort("id")
        .table(),
    Field::list("distribute_list", "distribute-list", DISTRIBUTE_LIST)
        .natural_sort("id")
        .table(),
    Field::list("neighbor", "neighbor", NEIGHBOR)
        .natural_sort("id")
        .table(),
    Field::list("network", "network", NETWORK)
        .natural_sort("id")
        .table(),
    Field::list("offset_list", "offset-list", OFFSET_LIST)
        .natural_sort("id")
        .table(),
    Field::list("passive_interface", "passive-interface", PASSIVE_INTERFACE)
        .natural_sort("name")
        .table(),
    Field::list("redistribute", "redistribute", REDISTRIBUTE)
        .natural_sort("name")
        .table(),
    Field::integer("update_timer", "update-timer").range(5, MAX_I32),
    Field::integer("timeout_timer", "timeout-timer").range(5, MAX_I32),
    Field::integer("garbage_timer", "garbage-timer").range(5, MAX_I32),
    Field::string("version", "version").one_of(&["1", "2"]),
    Field::list("interface", "interface", INTERFACE)
        .natural_sort("name")
        .table(),
];

pub static ROUTER_RIP: Schema = Schema {
    name: "router_rip",
    label: "RouterRip",
    path: "router/rip",
    kind: ObjectKind::Singleton,
    description: "RIP routing process: timers, networks, neighbors, and interface authentication.",
    fields: FIELDS,
};
