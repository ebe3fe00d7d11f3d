// application list: application control sensors.

use super::{ENABLE_DISABLE, ID_REF, MAX_U32};
use crate::schema::{Field, ObjectKind, Schema};

const MEMBERS: &[Field] = &[
    Field::integer("id", "id").range(0, MAX_U32),
    Field::string("name", "name").length(0, 31),
    Field::string("value", "value").length(0, 199),
];

const PARAMETERS: &[Field] = &[
    Field::integer("id", "id").range(0, MAX_U32),
    Field::list("members", "members", MEMBERS),
];

const RISK: &[Field] = &[Field::integer("level", "level").range(0, MAX_U32)];

const ENTRIES: &[Field] = &[
    Field::integer("id", "id").range(0, MAX_U32),
    Field::set("risk", "risk", RISK),
    Field::set("category", "category", ID_REF),
    Field::set("application", "application", ID_REF),
    Field::string("protocols", "protocols"),
    Field::string("vendor", "vendor"),
    Field::string("technology", "technology"),
    Field::string("behavior", "behavior"),
    Field::string("popularity", "popularity"),
    Field::set("exclusion", "exclusion", ID_REF),
    Field::list("parameters", "parameters", PARAMETERS).sorted("id"),
    Field::string("action", "action").one_of(&["pass", "block", "reset"]),
    Field::string("log", "log").one_of(ENABLE_DISABLE),
    Field::string("log_packet", "log-packet").one_of(ENABLE_DISABLE),
    Field::integer("rate_count", "rate-count").range(0, MAX_U32),
    Field::integer("rate_duration", "rate-duration").range(1, 65_535),
    Field::string("rate_mode", "rate-mode").one_of(&["periodical", "continuous"]),
    Field::string("rate_track", "rate-track").one_of(&[
        "none",
        "src-ip",
        "dest-ip",
        "dhcp-client",
        "dns-domain",
    ]),
    Field::integer("session_ttl", "session-ttl").range(0, MAX_U32),
    Field::string("shaper", "shaper").length(0, 35),
    Field::string("shaper_reverse", "shaper-reverse").length(0, 35),
    Field::string("per_ip_shaper", "per-ip-shaper").length(0, 35),
    Field::string("quarantine", "quarantine").one_of(&["none", "attacker"]),
    Field::string("quarantine_expiry", "quarantine-expiry"),
    Field::string("quarantine_log", "quarantine-log").one_of(ENABLE_DISABLE),
];

const FIELDS: &[Field] = &[
    Field::string("name", "name").length(0, 35),
    Field::string("comment", "comment").length(0, 1023),
    Field::string("replacemsg_group", "replacemsg-group").length(0, 35),
    Field::string("extended_log", "extended-log").one_of(ENABLE_DISABLE),
    Field::string("other_application_action", "other-application-action").one_of(&["pass", "block"]),
    Field::string("app_replacemsg", "app-replacemsg").one_of(ENABLE_DISABLE),
    Field::string("other_application_log", "other-application-log").one_of(ENABLE_DISABLE),
    Field::string("unknown_application_action", "unknown-application-action").one_of(&["pass", "block"]),
    Field::string("unknown_application_log", "unknown-application-log").one_of(ENABLE_DISABLE),
    Field::string("deep_app_inspection", "deep-app-inspection").one_of(ENABLE_DISABLE),
    Field::string("options", "options"),
    Field::list("entries", "entries", ENTRIES).sorted("id").table(),
];

pub static APPLICATION_LIST: Schema = Schema {
    name: "application_list",
    label: "ApplicationList",
    path: "application/list",
    kind: ObjectKind::Table { mkey: "name" },
    description: "Application control sensor: filters, overrides, and rate limits.",
    fields: FIELDS,
};
