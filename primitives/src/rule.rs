//! Rules: named combinations of [`Predicate`]s that all have to match a web request.
use crate::{
    config::Config,
    tag::{check_tags, Tag},
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_metric_name, check_optional_marker, check_optional_range, check_required_identifier,
        required, Error, Validate, LIST_LIMIT,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// The kind of condition set a [`Predicate`] points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
pub enum PredicateType {
    #[serde(rename = "IPMatch")]
    #[display("IPMatch")]
    IpMatch,
    ByteMatch,
    SqlInjectionMatch,
    GeoMatch,
    SizeConstraint,
    XssMatch,
    RegexMatch,
}

/// A reference to a condition set of a rule.
///
/// With `negated` set to `true` the rule matches requests that do *not* match the condition set,
/// e.g. every request that does not originate from the addresses of an `IPSet`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Predicate {
    pub negated: Option<bool>,
    #[serde(rename = "Type")]
    pub predicate_type: Option<PredicateType>,
    /// The id of the condition set, e.g. the `IPSetId` of an `IPMatch` predicate
    pub data_id: Option<String>,
}

impl Predicate {
    pub fn new(predicate_type: PredicateType, data_id: impl Into<String>) -> Self {
        Self {
            negated: Some(false),
            predicate_type: Some(predicate_type),
            data_id: Some(data_id.into()),
        }
    }

    pub fn negated(predicate_type: PredicateType, data_id: impl Into<String>) -> Self {
        Self {
            negated: Some(true),
            ..Self::new(predicate_type, data_id)
        }
    }
}

fluent_setters!(Predicate {
    with_negated => negated: bool,
    with_type => predicate_type: PredicateType,
    with_data_id => data_id: String,
});

impl UpdatePayload for Predicate {
    const FIELD: &'static str = "Predicate";
}

impl Validate for Predicate {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        required("Predicate.Negated", &self.negated)?;
        required("Predicate.Type", &self.predicate_type)?;

        check_required_identifier("Predicate.DataId", &self.data_id)
    }
}

/// Identifies the [`Predicate`]s a web request has to match; a rule with no predicates matches nothing
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    pub rule_id: Option<String>,
    pub name: Option<String>,
    /// Name of the CloudWatch metrics for this rule
    pub metric_name: Option<String>,
    pub predicates: Option<Vec<Predicate>>,
}

fluent_setters!(Rule {
    with_id => rule_id: String,
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_predicates => predicates: Vec<Predicate>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleSummary {
    pub rule_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(RuleSummary {
    with_rule_id => rule_id: String,
    with_name => name: String,
});

pub type RuleUpdate = Update<Predicate>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRuleRequest {
    pub name: Option<String>,
    pub metric_name: Option<String>,
    pub change_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

fluent_setters!(CreateRuleRequest {
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_change_token => change_token: String,
    with_tags => tags: Vec<Tag>,
});

impl Validate for CreateRuleRequest {
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
pub struct CreateRuleResponse {
    pub rule: Option<Rule>,
    pub change_token: Option<String>,
}

impl_operation!(CreateRuleRequest => CreateRuleResponse, "CreateRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRuleRequest {
    pub rule_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteRuleRequest {
    with_rule_id => rule_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteRuleRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleId", &self.rule_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRuleResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteRuleRequest => DeleteRuleResponse, "DeleteRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRuleRequest {
    pub rule_id: Option<String>,
}

fluent_setters!(GetRuleRequest {
    with_rule_id => rule_id: String,
});

impl Validate for GetRuleRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleId", &self.rule_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRuleResponse {
    pub rule: Option<Rule>,
}

impl_operation!(GetRuleRequest => GetRuleResponse, "GetRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRulesRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListRulesRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListRulesRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRulesResponse {
    pub next_marker: Option<String>,
    pub rules: Option<Vec<RuleSummary>>,
}

impl_operation!(ListRulesRequest => ListRulesResponse, "ListRules");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRuleRequest {
    pub rule_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<RuleUpdate>>,
}

fluent_setters!(UpdateRuleRequest {
    with_rule_id => rule_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<RuleUpdate>,
});

impl_update_set!(UpdateRuleRequest, Predicate, rule_id, "RuleId");

impl Validate for UpdateRuleRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRuleResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateRuleRequest => UpdateRuleResponse, "UpdateRule");
