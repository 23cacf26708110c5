//! Rate-based rules: rules that additionally count the requests of each client IP address.
use crate::{
    config::Config,
    rule::{Predicate, RuleSummary, RuleUpdate},
    tag::{check_tags, Tag},
    update::validate_update_set_allowing_empty,
    validator::{
        check_metric_name, check_optional_marker, check_optional_range, check_range,
        check_required_identifier, required, Error, Validate, LIST_LIMIT, RATE_LIMIT,
    },
};
use chrono::Duration;
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// The field the request rate is aggregated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
pub enum RateKey {
    #[serde(rename = "IP")]
    #[display("IP")]
    Ip,
}

/// The trailing period over which the requests of a single IP address are counted
pub fn rate_window() -> Duration {
    Duration::minutes(5)
}

fn check_rate_limit(rate_limit: &Option<i64>) -> Result<(), Error> {
    check_range("RateLimit", *required("RateLimit", rate_limit)?, RATE_LIMIT)
}

/// A [`Rule`](crate::rule::Rule) that matches once an IP address which satisfies all of the
/// `MatchPredicates` sends more than `RateLimit` requests within a [`rate_window`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateBasedRule {
    pub rule_id: Option<String>,
    pub name: Option<String>,
    pub metric_name: Option<String>,
    pub match_predicates: Option<Vec<Predicate>>,
    pub rate_key: Option<RateKey>,
    /// `100..=2_000_000_000` requests per five minutes
    pub rate_limit: Option<i64>,
}

fluent_setters!(RateBasedRule {
    with_id => rule_id: String,
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_match_predicates => match_predicates: Vec<Predicate>,
    with_rate_key => rate_key: RateKey,
    with_rate_limit => rate_limit: i64,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRateBasedRuleRequest {
    pub name: Option<String>,
    pub metric_name: Option<String>,
    pub rate_key: Option<RateKey>,
    pub rate_limit: Option<i64>,
    pub change_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

fluent_setters!(CreateRateBasedRuleRequest {
    with_name => name: String,
    with_metric_name => metric_name: String,
    with_rate_key => rate_key: RateKey,
    with_rate_limit => rate_limit: i64,
    with_change_token => change_token: String,
    with_tags => tags: Vec<Tag>,
});

impl Validate for CreateRateBasedRuleRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_metric_name("MetricName", required("MetricName", &self.metric_name)?)?;
        required("RateKey", &self.rate_key)?;
        check_rate_limit(&self.rate_limit)?;
        check_required_identifier("ChangeToken", &self.change_token)?;

        check_tags(&self.tags, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRateBasedRuleResponse {
    pub rule: Option<RateBasedRule>,
    pub change_token: Option<String>,
}

impl_operation!(CreateRateBasedRuleRequest => CreateRateBasedRuleResponse, "CreateRateBasedRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRateBasedRuleRequest {
    pub rule_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteRateBasedRuleRequest {
    with_rule_id => rule_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteRateBasedRuleRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleId", &self.rule_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRateBasedRuleResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteRateBasedRuleRequest => DeleteRateBasedRuleResponse, "DeleteRateBasedRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRateBasedRuleRequest {
    pub rule_id: Option<String>,
}

fluent_setters!(GetRateBasedRuleRequest {
    with_rule_id => rule_id: String,
});

impl Validate for GetRateBasedRuleRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleId", &self.rule_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRateBasedRuleResponse {
    pub rule: Option<RateBasedRule>,
}

impl_operation!(GetRateBasedRuleRequest => GetRateBasedRuleResponse, "GetRateBasedRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRateBasedRulesRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListRateBasedRulesRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListRateBasedRulesRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRateBasedRulesResponse {
    pub next_marker: Option<String>,
    pub rules: Option<Vec<RuleSummary>>,
}

impl_operation!(ListRateBasedRulesRequest => ListRateBasedRulesResponse, "ListRateBasedRules");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRateBasedRuleRequest {
    pub rule_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<RuleUpdate>>,
    /// The new limit, sent with every update batch
    pub rate_limit: Option<i64>,
}

fluent_setters!(UpdateRateBasedRuleRequest {
    with_rule_id => rule_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<RuleUpdate>,
    with_rate_limit => rate_limit: i64,
});

impl_update_set!(UpdateRateBasedRuleRequest, Predicate, rule_id, "RuleId");

impl Validate for UpdateRateBasedRuleRequest {
    /// `Updates` may be empty when only the `RateLimit` changes
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set_allowing_empty(self, config)?;
        check_rate_limit(&self.rate_limit)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRateBasedRuleResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateRateBasedRuleRequest => UpdateRateBasedRuleResponse, "UpdateRateBasedRule");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRateBasedRuleManagedKeysRequest {
    pub rule_id: Option<String>,
    pub next_marker: Option<String>,
}

fluent_setters!(GetRateBasedRuleManagedKeysRequest {
    with_rule_id => rule_id: String,
    with_next_marker => next_marker: String,
});

impl Validate for GetRateBasedRuleManagedKeysRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RuleId", &self.rule_id)?;
        check_optional_marker("NextMarker", &self.next_marker)
    }
}

/// The IP addresses currently blocked by a rate-based rule
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRateBasedRuleManagedKeysResponse {
    pub managed_keys: Option<Vec<String>>,
    pub next_marker: Option<String>,
}

impl_operation!(
    GetRateBasedRuleManagedKeysRequest => GetRateBasedRuleManagedKeysResponse,
    "GetRateBasedRuleManagedKeys"
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::GLOBAL_CONFIG,
        operation::prepare,
        test_util::{CHANGE_TOKEN, IP_PREDICATE, IP_SET_ID, RULE_ID},
        update::UpdateSetRequest,
        util::logging::discard_logger,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create(rate_limit: i64) -> CreateRateBasedRuleRequest {
        CreateRateBasedRuleRequest::default()
            .with_name("LoginFlood")
            .with_metric_name("LoginFlood")
            .with_rate_key(RateKey::Ip)
            .with_rate_limit(rate_limit)
            .with_change_token(CHANGE_TOKEN)
    }

    #[test]
    fn rate_limit_boundaries() {
        let config = &*GLOBAL_CONFIG;

        assert_eq!(Ok(()), create(100).validate(config));
        assert_eq!(Ok(()), create(2_000_000_000).validate(config));
        assert_eq!(
            Err(Error::OutOfRange {
                field: "RateLimit",
                value: 99,
                min: 100,
                max: 2_000_000_000,
            }),
            create(99).validate(config)
        );
        assert!(create(2_000_000_001).validate(config).is_err());
        assert_eq!(
            Err(Error::Missing("RateKey")),
            CreateRateBasedRuleRequest::default()
                .with_name("LoginFlood")
                .with_metric_name("LoginFlood")
                .validate(config)
        );
    }

    #[test]
    fn update_carries_the_rate_limit() {
        let request = UpdateRateBasedRuleRequest::default()
            .with_rule_id("12cs345-67cd-890b-1cd2-c3a4567d89f1")
            .with_change_token(CHANGE_TOKEN)
            .with_rate_limit(15_000_i64)
            .insert(IP_PREDICATE.clone());

        assert_eq!(
            json!({
                "RuleId": "12cs345-67cd-890b-1cd2-c3a4567d89f1",
                "ChangeToken": CHANGE_TOKEN,
                "Updates": [{
                    "Action": "INSERT",
                    "Predicate": { "Negated": false, "Type": "IPMatch", "DataId": IP_SET_ID }
                }],
                "RateLimit": 15000
            }),
            serde_json::to_value(&request).expect("Should serialize")
        );
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));

        let mut without_limit = request;
        without_limit.rate_limit = None;
        assert_eq!(
            Err(Error::Missing("RateLimit")),
            without_limit.validate(&GLOBAL_CONFIG)
        );
    }

    #[test]
    fn rate_limit_only_update() {
        let request = UpdateRateBasedRuleRequest::default()
            .with_rule_id(RULE_ID)
            .with_change_token(CHANGE_TOKEN)
            .with_updates(Vec::<RuleUpdate>::new())
            .with_rate_limit(5_000_i64);

        let prepared =
            prepare(&request, &GLOBAL_CONFIG, &discard_logger()).expect("Should prepare");
        assert_eq!(
            json!({
                "RuleId": RULE_ID,
                "ChangeToken": CHANGE_TOKEN,
                "Updates": [],
                "RateLimit": 5000
            }),
            serde_json::from_slice::<serde_json::Value>(&prepared.body).expect("JSON body")
        );

        let mut without_updates = request;
        without_updates.updates = None;
        assert_eq!(
            Err(Error::Missing("Updates")),
            without_updates.validate(&GLOBAL_CONFIG)
        );
    }

    #[test]
    fn managed_keys_response() {
        let response: GetRateBasedRuleManagedKeysResponse = serde_json::from_value(json!({
            "ManagedKeys": ["192.0.2.44/32", "2001:db8::/128"],
            "NextMarker": "marker"
        }))
        .expect("Should deserialize");

        assert_eq!(2, response.managed_keys.unwrap_or_default().len());
        assert_eq!(5, rate_window().num_minutes());
    }
}
