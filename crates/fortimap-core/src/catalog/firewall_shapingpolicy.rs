// firewall shaping-policy: traffic shaping (QoS) policies.

use super::{ENABLE_DISABLE, ID_REF, MAX_U32, NAME_REF};
use crate::schema::{Field, ObjectKind, Schema};

const FIELDS: &[Field] = &[
    Field::integer("id", "id").range(0, MAX_U32).computed(),
    Field::string("uuid", "uuid").computed(),
    Field::string("name", "name").length(0, 35),
    Field::string("comment", "comment").length(0, 1023),
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::string("ip_version", "ip-version").one_of(&["4", "6"]),
    Field::string("traffic_type", "traffic-type").one_of(&["forwarding", "local-in", "local-out"]),
    Field::set("srcaddr", "srcaddr", NAME_REF),
    Field::set("dstaddr", "dstaddr", NAME_REF),
    Field::set("srcaddr6", "srcaddr6", NAME_REF),
    Field::set("dstaddr6", "dstaddr6", NAME_REF),
    Field::string("internet_service", "internet-service").one_of(ENABLE_DISABLE),
    Field::set("service", "service", NAME_REF),
    Field::string("schedule", "schedule").length(0, 35),
    Field::set("users", "users", NAME_REF),
    Field::set("groups", "groups", NAME_REF),
    Field::set("application", "application", ID_REF),
    Field::set("app_category", "app-category", ID_REF),
    Field::set("url_category", "url-category", ID_REF),
    Field::set("srcintf", "srcintf", NAME_REF),
    Field::set("dstintf", "dstintf", NAME_REF),
    Field::string("tos", "tos"),
    Field::string("tos_mask", "tos-mask"),
    Field::string("tos_negate", "tos-negate").one_of(ENABLE_DISABLE),
    Field::string("traffic_shaper", "traffic-shaper").length(0, 35),
    Field::string("traffic_shaper_reverse", "traffic-shaper-reverse").length(0, 35),
    Field::string("per_ip_shaper", "per-ip-shaper").length(0, 35),
    Field::integer("class_id", "class-id").range(0, MAX_U32),
    Field::string("diffserv_forward", "diffserv-forward").one_of(ENABLE_DISABLE),
    Field::string("diffserv_reverse", "diffserv-reverse").one_of(ENABLE_DISABLE),
    Field::string("diffservcode_forward", "diffservcode-forward"),
    Field::string("diffservcode_rev", "diffservcode-rev"),
    Field::string("cos_mask", "cos-mask"),
    Field::string("cos", "cos"),
];

pub static FIREWALL_SHAPINGPOLICY: Schema = Schema {
    name: "firewall_shapingpolicy",
    label: "FirewallShapingPolicy",
    path: "firewall/shaping-policy",
    kind: ObjectKind::Table { mkey: "id" },
    description: "Traffic shaping policy assigning shapers and classes to matched sessions.",
    fields: FIELDS,
};
