//! Web ACLs: the ordered [`ActivatedRule`]s & the default action protecting a resource.
use crate::{
    action::WafAction,
    activated_rule::{check_inserted_priorities, check_unique_priorities, ActivatedRule},
    config::Config,
    tag::{check_tags, Tag},
    update::{validate_update_set, validate_update_set_allowing_empty, Update},
    validator::{
        check_length, check_marker, check_metric_name, check_optional_marker, check_optional_range,
        check_required_identifier, required, Error, Validate, LIST_LIMIT,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// The kind of regional resource a web ACL can be associated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum ResourceType {
    ApplicationLoadBalancer,
    ApiGateway,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebAcl {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    pub name: Option<String>,
    pub metric_name: Option<String>,
    /// Applied to requests that match none of the `Rules`
    pub default_action: Option<WafAction>,
    pub rules: Option<Vec<ActivatedRule>>,
    #[serde(rename = "WebACLArn")]
    pub web_acl_arn: Option<String>,
}

fluent_setters!(WebAcl {
    with_id => web_acl_id: String,
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_default_action => default_action: WafAction,
    with_rules => rules: Vec<ActivatedRule>,
    with_web_acl_arn => web_acl_arn: String,
});

impl WebAcl {
    /// The rules in the order they are evaluated, lowest priority first
    pub fn rules_by_priority(&self) -> Vec<&ActivatedRule> {
        let mut rules: Vec<_> = self.rules.iter().flatten().collect();
        rules.sort_by_key(|rule| rule.priority);

        rules
    }
}

impl Validate for WebAcl {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)?;
        required("DefaultAction", &self.default_action)?.validate(config)?;
        self.rules.validate(config)?;

        check_unique_priorities(self.rules.iter().flatten())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebAclSummary {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(WebAclSummary {
    with_web_acl_id => web_acl_id: String,
    with_name => name: String,
});

pub type WebAclUpdate = Update<ActivatedRule>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateWebAclRequest {
    pub name: Option<String>,
    pub metric_name: Option<String>,
    pub default_action: Option<WafAction>,
    pub change_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

fluent_setters!(CreateWebAclRequest {
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_default_action => default_action: WafAction,
    with_change_token => change_token: String,
    with_tags => tags: Vec<Tag>,
});

impl Validate for CreateWebAclRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_metric_name("MetricName", required("MetricName", &self.metric_name)?)?;
        required("DefaultAction", &self.default_action)?.validate(config)?;
        check_required_identifier("ChangeToken", &self.change_token)?;

        check_tags(&self.tags, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateWebAclResponse {
    #[serde(rename = "WebACL")]
    pub web_acl: Option<WebAcl>,
    pub change_token: Option<String>,
}

impl_operation!(CreateWebAclRequest => CreateWebAclResponse, "CreateWebACL");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteWebAclRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteWebAclRequest {
    with_web_acl_id => web_acl_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteWebAclRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteWebAclResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteWebAclRequest => DeleteWebAclResponse, "DeleteWebACL");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetWebAclRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
}

fluent_setters!(GetWebAclRequest {
    with_web_acl_id => web_acl_id: String,
});

impl Validate for GetWebAclRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetWebAclResponse {
    #[serde(rename = "WebACL")]
    pub web_acl: Option<WebAcl>,
}

impl_operation!(GetWebAclRequest => GetWebAclResponse, "GetWebACL");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListWebAclsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListWebAclsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListWebAclsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListWebAclsResponse {
    pub next_marker: Option<String>,
    #[serde(rename = "WebACLs")]
    pub web_acls: Option<Vec<WebAclSummary>>,
}

impl_operation!(ListWebAclsRequest => ListWebAclsResponse, "ListWebACLs");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateWebAclRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<WebAclUpdate>>,
    /// Replaces the default action, independent of the `Updates`
    pub default_action: Option<WafAction>,
}

fluent_setters!(UpdateWebAclRequest {
    with_web_acl_id => web_acl_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<WebAclUpdate>,
    with_default_action => default_action: WafAction,
});

impl_update_set!(UpdateWebAclRequest, ActivatedRule, web_acl_id, "WebACLId");

impl Validate for UpdateWebAclRequest {
    /// A request that replaces the `DefaultAction` may leave out the `Updates` or send none
    fn validate(&self, config: &Config) -> Result<(), Error> {
        self.default_action.validate(config)?;

        match (&self.updates, &self.default_action) {
            (None, Some(_)) => {
                check_required_identifier("WebACLId", &self.web_acl_id)?;
                return check_required_identifier("ChangeToken", &self.change_token);
            }
            (Some(_), Some(_)) => validate_update_set_allowing_empty(self, config)?,
            (_, None) => validate_update_set(self, config)?,
        }

        check_inserted_priorities(self.updates.as_deref().unwrap_or_default())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateWebAclResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateWebAclRequest => UpdateWebAclResponse, "UpdateWebACL");

/// Exports a web ACL as a CloudFormation template for the current WAF API
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateWebAclMigrationStackRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    /// Has to start with `aws-waf-migration-`
    pub s3_bucket_name: Option<String>,
    /// Skip the rules that can not be migrated instead of failing
    pub ignore_unsupported_type: Option<bool>,
}

fluent_setters!(CreateWebAclMigrationStackRequest {
    with_web_acl_id => web_acl_id: String,
    with_s3_bucket_name => s3_bucket_name: String,
    with_ignore_unsupported_type => ignore_unsupported_type: bool,
});

impl Validate for CreateWebAclMigrationStackRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)?;
        let bucket = required("S3BucketName", &self.s3_bucket_name)?;
        check_length("S3BucketName", bucket.chars().count(), 3..=63)?;
        required("IgnoreUnsupportedType", &self.ignore_unsupported_type)?;

        Ok(())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateWebAclMigrationStackResponse {
    /// The CloudFormation template of the migrated web ACL
    pub s3_object_url: Option<String>,
}

impl_operation!(CreateWebAclMigrationStackRequest => CreateWebAclMigrationStackResponse, "CreateWebACLMigrationStack");

fn check_resource_arn(arn: &Option<String>) -> Result<(), Error> {
    check_marker("ResourceArn", required("ResourceArn", arn)?)
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssociateWebAclRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    /// An Application Load Balancer or an API Gateway stage
    pub resource_arn: Option<String>,
}

fluent_setters!(AssociateWebAclRequest {
    with_web_acl_id => web_acl_id: String,
    with_resource_arn => resource_arn: String,
});

impl Validate for AssociateWebAclRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)?;
        check_resource_arn(&self.resource_arn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociateWebAclResponse {}

impl_operation!(regional AssociateWebAclRequest => AssociateWebAclResponse, "AssociateWebACL");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisassociateWebAclRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(DisassociateWebAclRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for DisassociateWebAclRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_resource_arn(&self.resource_arn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisassociateWebAclResponse {}

impl_operation!(regional DisassociateWebAclRequest => DisassociateWebAclResponse, "DisassociateWebACL");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetWebAclForResourceRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(GetWebAclForResourceRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for GetWebAclForResourceRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_resource_arn(&self.resource_arn)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetWebAclForResourceResponse {
    /// Absent when no web ACL is associated with the resource
    #[serde(rename = "WebACLSummary")]
    pub web_acl_summary: Option<WebAclSummary>,
}

impl_operation!(regional GetWebAclForResourceRequest => GetWebAclForResourceResponse, "GetWebACLForResource");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourcesForWebAclRequest {
    #[serde(rename = "WebACLId")]
    pub web_acl_id: Option<String>,
    /// Defaults to `APPLICATION_LOAD_BALANCER`
    pub resource_type: Option<ResourceType>,
}

fluent_setters!(ListResourcesForWebAclRequest {
    with_web_acl_id => web_acl_id: String,
    with_resource_type => resource_type: ResourceType,
});

impl Validate for ListResourcesForWebAclRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("WebACLId", &self.web_acl_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourcesForWebAclResponse {
    pub resource_arns: Option<Vec<String>>,
}

impl_operation!(
    regional ListResourcesForWebAclRequest => ListResourcesForWebAclResponse,
    "ListResourcesForWebACL"
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        action::{WafActionType, WafOverrideActionType},
        config::GLOBAL_CONFIG,
        operation::Operation,
        test_util::{
            BLOCKING_RULE, CHANGE_TOKEN, EXCLUDED_RULE_ID, GROUP_RULE, RULE_GROUP_ID, RULE_ID,
            WEB_ACL_ID,
        },
        update::UpdateSetRequest,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};

    #[test]
    fn update_web_acl_wire_format() {
        let request = UpdateWebAclRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_change_token(CHANGE_TOKEN)
            .with_default_action(WafActionType::Allow)
            .delete(ActivatedRule::rule(1, RULE_ID, WafActionType::Allow))
            .insert(
                ActivatedRule::group(1, RULE_GROUP_ID, WafOverrideActionType::None)
                    .exclude(EXCLUDED_RULE_ID),
            );

        assert_eq!(
            json!({
                "WebACLId": "webacl-1472061481310",
                "ChangeToken": CHANGE_TOKEN,
                "Updates": [
                    {
                        "Action": "DELETE",
                        "ActivatedRule": {
                            "Priority": 1,
                            "RuleId": RULE_ID,
                            "Action": { "Type": "ALLOW" },
                            "Type": "REGULAR"
                        }
                    },
                    {
                        "Action": "INSERT",
                        "ActivatedRule": {
                            "Priority": 1,
                            "RuleId": RULE_GROUP_ID,
                            "OverrideAction": { "Type": "NONE" },
                            "Type": "GROUP",
                            "ExcludedRules": [{ "RuleId": EXCLUDED_RULE_ID }]
                        }
                    }
                ],
                "DefaultAction": { "Type": "ALLOW" }
            }),
            to_value(&request).expect("Should serialize")
        );
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
    }

    #[test]
    fn default_action_only_update() {
        let config = &*GLOBAL_CONFIG;
        let request = UpdateWebAclRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_change_token(CHANGE_TOKEN)
            .with_default_action(WafActionType::Block);

        assert_eq!(Ok(()), request.validate(config));

        let mut neither = request;
        neither.default_action = None;
        assert_eq!(Err(Error::Missing("Updates")), neither.validate(config));
    }

    #[test]
    fn default_action_with_an_empty_batch() {
        let config = &*GLOBAL_CONFIG;
        let request = UpdateWebAclRequest::default()
            .with_web_acl_id(WEB_ACL_ID)
            .with_change_token(CHANGE_TOKEN)
            .with_updates(Vec::<WebAclUpdate>::new())
            .with_default_action(WafActionType::Block);

        assert_eq!(
            json!({
                "WebACLId": WEB_ACL_ID,
                "ChangeToken": CHANGE_TOKEN,
                "Updates": [],
                "DefaultAction": { "Type": "BLOCK" }
            }),
            to_value(&request).expect("Should serialize")
        );
        assert_eq!(Ok(()), request.validate(config));

        let mut without_default_action = request;
        without_default_action.default_action = None;
        assert_eq!(Err(Error::EmptyUpdates), without_default_action.validate(config));
    }

    #[test]
    fn batch_keeps_the_call_order() {
        let request = UpdateWebAclRequest::default()
            .with_web_acl_id(WEB_ACL_ID)
            .with_change_token(CHANGE_TOKEN)
            .insert(GROUP_RULE.clone())
            .insert(BLOCKING_RULE.clone());

        let body = to_value(&request).expect("Should serialize");
        let inserted: Vec<_> = body["Updates"]
            .as_array()
            .expect("Should have Updates")
            .iter()
            .map(|update| update["ActivatedRule"]["Priority"].clone())
            .collect();

        // priority 2 before priority 1, as the entries were added
        assert_eq!(vec![json!(2), json!(1)], inserted);
        assert_eq!(
            request,
            serde_json::from_value::<UpdateWebAclRequest>(body).expect("Should deserialize")
        );
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
    }

    #[test]
    fn inserted_priorities_are_unique() {
        let request = UpdateWebAclRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_change_token(CHANGE_TOKEN)
            .insert(ActivatedRule::rule(3, "a", WafActionType::Block))
            .insert(ActivatedRule::rate_based(3, "b", WafActionType::Block));

        assert_eq!(
            Err(Error::DuplicatePriority(3)),
            request.validate(&GLOBAL_CONFIG)
        );
    }

    #[test]
    fn web_acl_rules() {
        let config = &*GLOBAL_CONFIG;
        let web_acl = WebAcl::default()
            .with_id("webacl-1472061481310")
            .with_name("MyWebACL")
            .with_default_action(WafActionType::Allow)
            .with_rules(vec![
                ActivatedRule::rule(10, "b", WafActionType::Count),
                ActivatedRule::rule(1, "a", WafActionType::Block),
            ]);

        assert_eq!(Ok(()), web_acl.validate(config));
        let order: Vec<_> = web_acl
            .rules_by_priority()
            .into_iter()
            .filter_map(|rule| rule.rule_id.as_deref())
            .collect();
        assert_eq!(vec!["a", "b"], order);

        let clashing = web_acl.with_rules(vec![
            ActivatedRule::rule(1, "a", WafActionType::Block),
            ActivatedRule::rule(1, "b", WafActionType::Count),
        ]);
        assert_eq!(Err(Error::DuplicatePriority(1)), clashing.validate(config));
    }

    #[test]
    fn get_web_acl_response() {
        let json = json!({
            "WebACL": {
                "WebACLId": WEB_ACL_ID,
                "Name": "MyWebACL",
                "MetricName": "CreateExample",
                "DefaultAction": { "Type": "ALLOW" },
                "Rules": [{
                    "Priority": 1,
                    "RuleId": RULE_ID,
                    "Action": { "Type": "ALLOW" },
                    "Type": "REGULAR"
                }],
                "WebACLArn": "arn:aws:waf::123456789012:webacl/createwebacl-1472061481310"
            }
        });

        let response: GetWebAclResponse =
            serde_json::from_value(json.clone()).expect("Should deserialize");
        assert_eq!(json, to_value(&response).expect("Should serialize"));
    }

    #[test]
    fn regional_only_actions() {
        assert!(AssociateWebAclRequest::REGIONAL_ONLY);
        assert!(DisassociateWebAclRequest::REGIONAL_ONLY);
        assert!(GetWebAclForResourceRequest::REGIONAL_ONLY);
        assert!(ListResourcesForWebAclRequest::REGIONAL_ONLY);
        assert!(!CreateWebAclRequest::REGIONAL_ONLY);
        assert_eq!("AssociateWebACL", AssociateWebAclRequest::NAME);

        let request = ListResourcesForWebAclRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_resource_type(ResourceType::ApiGateway);
        assert_eq!(
            json!({ "WebACLId": "webacl-1472061481310", "ResourceType": "API_GATEWAY" }),
            to_value(&request).expect("Should serialize")
        );
    }

    #[test]
    fn migration_stack_bucket() {
        let config = &*GLOBAL_CONFIG;
        let request = CreateWebAclMigrationStackRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_s3_bucket_name("aws-waf-migration-example")
            .with_ignore_unsupported_type(true);

        assert_eq!(Ok(()), request.validate(config));
        assert!(request
            .with_s3_bucket_name("x".repeat(64))
            .validate(config)
            .is_err());
    }
}
