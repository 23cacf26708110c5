use serde_json::json;
use waf_primitives::{
    activated_rule::ActivatedRule,
    web_acl::UpdateWebAclRequest,
    UpdateSetRequest, WafActionType, WafOverrideActionType,
};

fn main() {
    // Replaces a regular rule with a rule group, counting one of the group's rules
    let update_json = json!({
        "WebACLId": "webacl-1472061481310",
        "ChangeToken": "abcd12f2-46da-4fdb-b8d5-fbd4c466928f",
        "Updates": [
            {
                "Action": "DELETE",
                "ActivatedRule": {
                    "Priority": 1,
                    "RuleId": "WAFRule-1-Example",
                    "Action": { "Type": "ALLOW" },
                    "Type": "REGULAR"
                }
            },
            {
                "Action": "INSERT",
                "ActivatedRule": {
                    "Priority": 1,
                    "RuleId": "12345cb-2e36-4d27-b2ce-b01fdf5e8b2a",
                    "OverrideAction": { "Type": "NONE" },
                    "Type": "GROUP",
                    "ExcludedRules": [{ "RuleId": "5432cb-2e36-4d27-b2ce-b01fdf5e8b2a" }]
                }
            }
        ],
        "DefaultAction": { "Type": "ALLOW" }
    });

    let from_json: UpdateWebAclRequest =
        serde_json::from_value(update_json).expect("should deserialize");

    let built = UpdateWebAclRequest::default()
        .with_web_acl_id("webacl-1472061481310")
        .with_change_token("abcd12f2-46da-4fdb-b8d5-fbd4c466928f")
        .replace(
            ActivatedRule::rule(1, "WAFRule-1-Example", WafActionType::Allow),
            ActivatedRule::group(
                1,
                "12345cb-2e36-4d27-b2ce-b01fdf5e8b2a",
                WafOverrideActionType::None,
            )
            .exclude("5432cb-2e36-4d27-b2ce-b01fdf5e8b2a"),
        )
        .with_default_action(WafActionType::Allow);

    assert_eq!(from_json, built);
}
