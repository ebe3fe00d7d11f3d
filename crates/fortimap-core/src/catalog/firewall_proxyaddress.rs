// firewall proxy-address: explicit web proxy address objects.

use super::{ENABLE_DISABLE, ID_REF, NAME_REF};
use crate::schema::{Field, ObjectKind, Schema};

const HEADER_GROUP: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::string("header_name", "header-name").length(0, 79),
    Field::string("header", "header").length(0, 255),
    Field::string("case_sensitivity", "case-sensitivity").one_of(ENABLE_DISABLE),
];

const TAGGING: &[Field] = &[
    Field::string("name", "name").length(0, 63),
    Field::string("category", "category").length(0, 63),
    Field::set("tags", "tags", NAME_REF),
];

const FIELDS: &[Field] = &[
    Field::string("name", "name").length(0, 79),
    Field::string("uuid", "uuid").computed(),
    Field::string("type", "type").one_of(&[
        "host-regex",
        "url",
        "category",
        "method",
        "ua",
        "header",
        "src-advanced",
        "dst-advanced",
        "saas",
    ]),
    Field::string("host", "host").length(0, 79),
    Field::string("host_regex", "host-regex").length(0, 255),
    Field::string("path", "path").length(0, 255),
    Field::string("query", "query").length(0, 255),
    Field::string("referrer", "referrer").one_of(ENABLE_DISABLE),
    Field::set("category", "category", ID_REF),
    Field::string("method", "method"),
    Field::string("ua", "ua"),
    Field::string("ua_min_ver", "ua-min-ver").length(0, 63),
    Field::string("ua_max_ver", "ua-max-ver").length(0, 63),
    Field::string("header_name", "header-name").length(0, 79),
    Field::string("header", "header").length(0, 255),
    Field::string("case_sensitivity", "case-sensitivity").one_of(ENABLE_DISABLE),
    Field::list("header_group", "header-group", HEADER_GROUP)
        .sorted("id")
        .table(),
    Field::integer("color", "color").range(0, 32),
    Field::list("tagging", "tagging", TAGGING).sorted("name").table(),
    Field::string("comment", "comment").length(0, 255),
    Field::set("application", "application", NAME_REF),
    Field::string("visibility", "visibility").one_of(ENABLE_DISABLE),
];

pub static FIREWALL_PROXYADDRESS: Schema = Schema {
    name: "firewall_proxyaddress",
    label: "FirewallProxyAddress",
    path: "firewall/proxy-address",
    kind: ObjectKind::Table { mkey: "name" },
    description: "Web proxy address matched by host, URL pattern, header, or category.",
    fields: FIELDS,
};
