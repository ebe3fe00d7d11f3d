// voip profile: SIP/SCCP inspection profiles.

use crate::schema::{Field, ObjectKind, Schema};
use crate::version::{VersionOp, VersionRange};

// `codec` switched from a numeric id to a codec name in 7.4.0; both local
// fields write the same wire key.
const CODEC_AS_ID: VersionRange = VersionRange::new(VersionOp::Lt, &["7.4.0"]);
const CODEC_AS_NAME: VersionRange = VersionRange::new(VersionOp::Ge, &["7.4.0"]);

const FIELDS: &[Field] = &[
    Field::string("name", "name").length(0, 35),
    Field::string("feature_set", "feature-set").one_of(&["ips", "voipd"]),
    Field::string("comment", "comment").length(0, 255),
    Field::integer("codec", "codec")
        .range(0, 127)
        .versions(CODEC_AS_ID)
        .alternate("codec_name"),
    Field::string("codec_name", "codec")
        .one_of(&["g711", "g722", "g729", "opus"])
        .versions(CODEC_AS_NAME)
        .alternate("codec"),
];

pub static VOIP_PROFILE: Schema = Schema {
    name: "voip_profile",
    label: "VoipProfile",
    path: "voip/profile",
    kind: ObjectKind::Table { mkey: "name" },
    description: "VoIP inspection profile.",
    fields: FIELDS,
};
