// system.snmp sysinfo: SNMP agent identity and trap thresholds.

use super::ENABLE_DISABLE;
use crate::schema::{Field, ObjectKind, Schema};

const FIELDS: &[Field] = &[
    Field::string("status", "status").one_of(ENABLE_DISABLE),
    Field::string("engine_id_type", "engine-id-type").one_of(&["text", "hex", "mac"]),
    Field::string("engine_id", "engine-id").length(0, 54),
    Field::string("description", "description").length(0, 255),
    Field::string("contact_info", "contact-info").length(0, 255),
    Field::string("location", "location").length(0, 255),
    Field::integer("trap_high_cpu_threshold", "trap-high-cpu-threshold").range(1, 100),
    Field::integer("trap_low_memory_threshold", "trap-low-memory-threshold").range(1, 100),
    Field::integer("trap_log_full_threshold", "trap-log-full-threshold").range(1, 100),
    Field::integer("trap_free_memory_threshold", "trap-free-memory-threshold").range(1, 100),
    Field::integer("trap_freeable_memory_threshold", "trap-freeable-memory-threshold").range(1, 100),
];

pub static SYSTEM_SNMP_SYSINFO: Schema = Schema {
    name: "system_snmp_sysinfo",
    label: "SystemSnmpSysinfo",
    path: "system.snmp/sysinfo",
    kind: ObjectKind::Singleton,
    description: "SNMP system information and trap thresholds.",
    fields: FIELDS,
};
