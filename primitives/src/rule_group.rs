//! Rule groups: collections of rules placed in a web ACL as a single [`ActivatedRule`].
use crate::{
    activated_rule::{check_inserted_priorities, ActivatedRule},
    config::Config,
    tag::{check_tags, Tag},
    update::{validate_update_set, Update},
    validator::{
        check_metric_name, check_optional_identifier, check_optional_marker, check_optional_range,
        check_required_identifier, required, Error, Validate, LIST_LIMIT,
    },
};
use serde::{Deserialize, Serialize};

/// The rules of a group are listed through `ListActivatedRulesInRuleGroup`
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroup {
    pub rule_group_id: Option<String>,
    pub name: Option<String>,
    pub metric_name: Option<String>,
}

fluent_setters!(RuleGroup {
    with_id => rule_group_id: String,
    with_name => name: String,
    with_metric_name => metric_name: String,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleGroupSummary {
    pub rule_group_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(RuleGroupSummary {
    with_rule_group_id => rule_group_id: String,
    with_name => name: String,
});

/// A rule group bought on the marketplace
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscribedRuleGroupSummary {
    pub rule_group_id: Option<String>,
    pub name: Option<String>,
    pub metric_name: Option<String>,
}

fluent_setters!(SubscribedRuleGroupSummary {
    with_rule_group_id => rule_group_id: String,
    with_name => name: String,
    with_metric_name => metric_name: String,
});

pub type RuleGroupUpdate = Update<ActivatedRule>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRuleGroupRequest {
    pub name: Option<String>,
    pub metric_name: Option<String>,
    pub change_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

fluent_setters!(CreateRuleGroupRequest {
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_change_token => change_token: String,
    with_tags => tags: Vec<Tag>,
});

impl Validate for CreateRuleGroupRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_metric_name("MetricName", required("MetricName", &self.metric_name)?)?;
        check_required_identifier("ChangeToken", &self.change_token)?;

        check_tags(&self.tags, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRuleGroupResponse {
    pub rule_group: Option<RuleGroup>,
    pub change_token: Option<String>,
}

impl_operation!(CreateRuleGroupRequest => CreateRuleGroupResponse, "CreateRuleGroup");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRuleGroupRequest {
    pub rule_group_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteRuleGroupRequest {
    with_rule_group_id => rule_group_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteRuleGroupRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleGroupId", &self.rule_group_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRuleGroupResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteRuleGroupRequest => DeleteRuleGroupResponse, "DeleteRuleGroup");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRuleGroupRequest {
    pub rule_group_id: Option<String>,
}

fluent_setters!(GetRuleGroupRequest {
    with_rule_group_id => rule_group_id: String,
});

impl Validate for GetRuleGroupRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleGroupId", &self.rule_group_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRuleGroupResponse {
    pub rule_group: Option<RuleGroup>,
}

impl_operation!(GetRuleGroupRequest => GetRuleGroupResponse, "GetRuleGroup");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRuleGroupsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListRuleGroupsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListRuleGroupsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRuleGroupsResponse {
    pub next_marker: Option<String>,
    pub rule_groups: Option<Vec<RuleGroupSummary>>,
}

impl_operation!(ListRuleGroupsRequest => ListRuleGroupsResponse, "ListRuleGroups");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRuleGroupRequest {
    pub rule_group_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<RuleGroupUpdate>>,
}

fluent_setters!(UpdateRuleGroupRequest {
    with_rule_group_id => rule_group_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<RuleGroupUpdate>,
});

impl_update_set!(UpdateRuleGroupRequest, ActivatedRule, rule_group_id, "RuleGroupId");

impl Validate for UpdateRuleGroupRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)?;

        check_inserted_priorities(self.updates.as_deref().unwrap_or_default())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRuleGroupResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateRuleGroupRequest => UpdateRuleGroupResponse, "UpdateRuleGroup");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListActivatedRulesInRuleGroupRequest {
    /// Without an id the rules of every rule group are listed
    pub rule_group_id: Option<String>,
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListActivatedRulesInRuleGroupRequest {
    with_rule_group_id => rule_group_id: String,
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListActivatedRulesInRuleGroupRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_identifier("RuleGroupId", &self.rule_group_id)?;
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListActivatedRulesInRuleGroupResponse {
    pub next_marker: Option<String>,
    pub activated_rules: Option<Vec<ActivatedRule>>,
}

impl_operation!(ListActivatedRulesInRuleGroupRequest => ListActivatedRulesInRuleGroupResponse, "ListActivatedRulesInRuleGroup");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSubscribedRuleGroupsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListSubscribedRuleGroupsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListSubscribedRuleGroupsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSubscribedRuleGroupsResponse {
    pub next_marker: Option<String>,
    pub rule_groups: Option<Vec<SubscribedRuleGroupSummary>>,
}

impl_operation!(ListSubscribedRuleGroupsRequest => ListSubscribedRuleGroupsResponse, "ListSubscribedRuleGroups");

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        action::WafActionType,
        config::GLOBAL_CONFIG,
        test_util::CHANGE_TOKEN,
        update::UpdateSetRequest,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn update_rule_group_priorities() {
        let config = &*GLOBAL_CONFIG;
        let request = UpdateRuleGroupRequest::default()
            .with_rule_group_id("example1ds3t-46da-4fdb-b8d5-abc321j569j5")
            .with_change_token(CHANGE_TOKEN)
            .insert(ActivatedRule::rule(1, "WAFRule-1-Example", WafActionType::Block))
            .insert(ActivatedRule::rule(2, "WAFRule-2-Example", WafActionType::Count));

        assert_eq!(Ok(()), request.validate(config));

        let clashing = request.insert(ActivatedRule::rule(2, "WAFRule-3-Example", WafActionType::Allow));
        assert_eq!(Err(Error::DuplicatePriority(2)), clashing.validate(config));
    }

    #[test]
    fn list_activated_rules() {
        let request = ListActivatedRulesInRuleGroupRequest::default().with_limit(100_i64);
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
        assert_eq!(
            json!({ "Limit": 100 }),
            serde_json::to_value(&request).expect("Should serialize")
        );

        let response: ListActivatedRulesInRuleGroupResponse = serde_json::from_value(json!({
            "ActivatedRules": [{
                "Priority": 1,
                "RuleId": "WAFRule-1-Example",
                "Action": { "Type": "BLOCK" }
            }]
        }))
        .expect("Should deserialize");

        assert_eq!(
            Some(vec![ActivatedRule {
                rule_type: None,
                ..ActivatedRule::rule(1, "WAFRule-1-Example", WafActionType::Block)
            }]),
            response.activated_rules
        );
    }

    #[test]
    fn subscribed_rule_groups() {
        let response: ListSubscribedRuleGroupsResponse = serde_json::from_value(json!({
            "RuleGroups": [{
                "RuleGroupId": "12345cb-2e36-4d27-b2ce-b01fdf5e8b2a",
                "Name": "Marketplace Group",
                "MetricName": "MarketplaceGroup"
            }]
        }))
        .expect("Should deserialize");

        let groups = response.rule_groups.unwrap_or_default();
        assert_eq!(Some("MarketplaceGroup"), groups[0].metric_name.as_deref());
        assert_eq!(None, response.next_marker);
    }
}
