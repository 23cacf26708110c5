use serde_json::json;
use waf_primitives::{
    byte_match::{GetByteMatchSetResponse, PositionalConstraint},
    MatchFieldType,
};

fn main() {
    let response_json = json!({
        "ByteMatchSet": {
            "ByteMatchSetId": "exampleIDs3t-46da-4fdb-b8d5-abc321j569j5",
            "ByteMatchTuples": [
                {
                    "FieldToMatch": {
                        "Data": "referer",
                        "Type": "HEADER"
                    },
                    "PositionalConstraint": "CONTAINS",
                    "TargetString": "YmFkcmVmZXJyZXI=",
                    "TextTransformation": "NONE"
                }
            ],
            "Name": "ByteMatchNameExample"
        }
    });

    let response: GetByteMatchSetResponse =
        serde_json::from_value(response_json).expect("should deserialize");

    let tuples = response
        .byte_match_set
        .and_then(|set| set.byte_match_tuples)
        .unwrap_or_default();
    let tuple = &tuples[0];

    // base64 on the wire, raw bytes in the model
    assert_eq!(Some(b"badreferrer".to_vec()), tuple.target_string);
    assert_eq!(Some(PositionalConstraint::Contains), tuple.positional_constraint);
    assert_eq!(
        Some(MatchFieldType::Header),
        tuple.field_to_match.as_ref().and_then(|field| field.match_type)
    );
}
