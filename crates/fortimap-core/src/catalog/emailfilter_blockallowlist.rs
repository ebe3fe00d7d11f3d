// emailfilter block-allow-list: sender/recipient/IP block and allow entries.

use super::{ENABLE_DISABLE, MAX_U32};
use crate::schema::{Field, ObjectKind, Schema};

const ENTRIES: &[Field] = &[
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::integer("id", "id").range(0, MAX_U32),
    Field::string("type", "type").one_of(&["ip", "email-to", "email-from", "subject"]),
    Field::string("action", "action").one_of(&["reject", "spam", "clear"]),
    Field::string("addr_type", "addr-type").one_of(&["ipv4", "ipv6"]),
    Field::string("ip4_subnet", "ip4-subnet").subnet(),
    Field::string("ip6_subnet", "ip6-subnet"),
    Field::string("pattern_type", "pattern-type").one_of(&["wildcard", "regexp"]),
    Field::string("pattern", "pattern").length(0, 127),
];

const FIELDS: &[Field] = &[
    Field::integer("id", "id").range(0, MAX_U32).computed(),
    Field::string("name", "name").length(0, 63),
    Field::string("comment", "comment").length(0, 255),
    Field::list("entries", "entries", ENTRIES),
];

pub static EMAILFILTER_BLOCKALLOWLIST: Schema = Schema {
    name: "emailfilter_blockallowlist",
    label: "EmailfilterBlockAllowList",
    path: "emailfilter/block-allow-list",
    kind: ObjectKind::Table { mkey: "id" },
    description: "Anti-spam block/allow list of addresses, subjects, and subnets.",
    fields: FIELDS,
};
