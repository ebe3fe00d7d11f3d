#![allow(clippy::unwrap_used)]
// Property tests for ordering and identity round trips.

use proptest::prelude::*;
use serde_json::{Value, json};

use fortimap_core::catalog::{APPLICATION_LIST, SYSTEM_SESSIONTTL, SYSTEM_SNMP_SYSINFO};
use fortimap_core::helpers::natural_cmp;
use fortimap_core::{Context, Object, ResourceData, StandardHelpers, assemble, refresh};

const IMPORT_ALL: StandardHelpers = StandardHelpers {
    import_all_tables: true,
};

fn flatten(schema: &fortimap_core::Schema, wire: Value) -> Object {
    let Value::Object(wire) = wire else {
        unreachable!()
    };
    let mut data = ResourceData::new(Object::new());
    refresh(schema, &mut data, &wire, &Context::new(&IMPORT_ALL, ""), true).unwrap();
    data.state().clone()
}

proptest! {
    // Entries of an unsorted table keep wire order.
    #[test]
    fn unsorted_members_keep_order(values in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let members: Vec<Value> = values.iter().map(|v| json!({ "value": v })).collect();
        let wire = json!({
            "name": "app",
            "entries": [{ "id": 1, "parameters": [{ "id": 1, "members": members }] }]
        });
        let state = flatten(&APPLICATION_LIST, wire);
        let got: Vec<&str> = state["entries"][0]["parameters"][0]["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["value"].as_str().unwrap())
            .collect();
        prop_assert_eq!(got, values.iter().map(String::as_str).collect::<Vec<_>>());
    }

    // Any permutation of a sorted table flattens to key order.
    #[test]
    fn sorted_table_is_stable(ids in prop::collection::hash_set(0u32..100_000, 1..16)) {
        let ports: Vec<Value> = ids.iter().map(|id| json!({ "id": id, "timeout": "300" })).collect();
        let state = flatten(&SYSTEM_SESSIONTTL, json!({ "default": "3600", "port": ports }));
        let got: Vec<u64> = state["port"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        let mut want: Vec<u64> = ids.into_iter().map(u64::from).collect();
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }

    // Natural order agrees with numeric order on the digit suffix.
    #[test]
    fn natural_order_is_numeric(a in 0u32..10_000, b in 0u32..10_000) {
        let (x, y) = (format!("port{a}"), format!("port{b}"));
        prop_assert_eq!(natural_cmp(&x, &y), a.cmp(&b));
    }

    // Identity scalars survive expand followed by flatten.
    #[test]
    fn identity_scalars_round_trip(
        location in "[A-Za-z0-9 ]{1,64}",
        contact in "[a-z]{1,20}@[a-z]{1,10}\\.net",
        cpu in 1i64..=100,
    ) {
        let config = json!({
            "location": location,
            "contact_info": contact,
            "trap_high_cpu_threshold": cpu
        });
        let Value::Object(cfg) = config.clone() else { unreachable!() };
        let data = ResourceData::new(cfg);
        let payload = assemble(&SYSTEM_SNMP_SYSINFO, &data, &Context::new(&IMPORT_ALL, "7.4.1")).unwrap();
        let state = flatten(&SYSTEM_SNMP_SYSINFO, Value::Object(payload));
        prop_assert_eq!(Value::Object(state), config);
    }
}
