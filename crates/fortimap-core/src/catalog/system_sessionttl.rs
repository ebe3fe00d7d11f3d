// system session-ttl: global and per-port session timeouts.

use crate::schema::{Field, ObjectKind, Schema};

const PORT: &[Field] = &[
    Field::integer("id", "id").range(0, 4_294_967_295),
    Field::integer("protocol", "protocol").range(0, 255),
    Field::integer("start_port", "start-port").range(0, 65_535),
    Field::integer("end_port", "end-port").range(0, 65_535),
    Field::string("timeout", "timeout"),
];

const FIELDS: &[Field] = &[
    Field::string("default", "default"),
    Field::list("port", "port", PORT).sorted("id").table(),
];

pub static SYSTEM_SESSIONTTL: Schema = Schema {
    name: "system_sessionttl",
    label: "SystemSessionTtl",
    path: "system/session-ttl",
    kind: ObjectKind::Singleton,
    description: "Default session TTL and per-protocol/port overrides.",
    fields: FIELDS,
};
