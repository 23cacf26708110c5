//! Rules as they are placed in a web ACL or rule group.
use crate::{
    action::{WafAction, WafOverrideAction},
    config::Config,
    update::{Update, UpdatePayload},
    validator::{check_required_identifier, required, Error, Validate},
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum WafRuleType {
    #[default]
    Regular,
    RateBased,
    Group,
}

/// A rule of a rule group whose action is replaced with `COUNT`.
/// The rule itself stays in the group.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExcludedRule {
    pub rule_id: Option<String>,
}

impl ExcludedRule {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
        }
    }
}

fluent_setters!(ExcludedRule {
    with_rule_id => rule_id: String,
});

impl Validate for ExcludedRule {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("ExcludedRule.RuleId", &self.rule_id)
    }
}

/// A rule, rate-based rule or rule group placed in a web ACL (or a rule in a rule group).
///
/// Rules are evaluated in ascending `Priority`; priorities don't have to be consecutive but
/// have to be unique within the list. A `REGULAR` or `RATE_BASED` rule carries an `Action`;
/// a `GROUP` carries an `OverrideAction` instead, either keeping the actions of its own rules
/// (`NONE`) or counting every match (`COUNT`). `ExcludedRules` of a group are always counted.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivatedRule {
    pub priority: Option<i32>,
    pub rule_id: Option<String>,
    pub action: Option<WafAction>,
    pub override_action: Option<WafOverrideAction>,
    /// Defaults to `REGULAR` when absent
    #[serde(rename = "Type")]
    pub rule_type: Option<WafRuleType>,
    pub excluded_rules: Option<Vec<ExcludedRule>>,
}

impl ActivatedRule {
    /// A `REGULAR` rule
    pub fn rule(priority: i32, rule_id: impl Into<String>, action: impl Into<WafAction>) -> Self {
        Self {
            priority: Some(priority),
            rule_id: Some(rule_id.into()),
            action: Some(action.into()),
            rule_type: Some(WafRuleType::Regular),
            ..Self::default()
        }
    }

    pub fn rate_based(
        priority: i32,
        rule_id: impl Into<String>,
        action: impl Into<WafAction>,
    ) -> Self {
        Self {
            rule_type: Some(WafRuleType::RateBased),
            ..Self::rule(priority, rule_id, action)
        }
    }

    pub fn group(
        priority: i32,
        rule_group_id: impl Into<String>,
        override_action: impl Into<WafOverrideAction>,
    ) -> Self {
        Self {
            priority: Some(priority),
            rule_id: Some(rule_group_id.into()),
            override_action: Some(override_action.into()),
            rule_type: Some(WafRuleType::Group),
            ..Self::default()
        }
    }

    /// Forces the given rule of the group to `COUNT`
    #[must_use]
    pub fn exclude(mut self, rule_id: impl Into<String>) -> Self {
        self.excluded_rules
            .get_or_insert_with(Vec::new)
            .push(ExcludedRule::new(rule_id));
        self
    }

    pub fn effective_type(&self) -> WafRuleType {
        self.rule_type.unwrap_or_default()
    }

    pub fn is_group(&self) -> bool {
        self.effective_type() == WafRuleType::Group
    }
}

fluent_setters!(ActivatedRule {
    with_priority => priority: i32,
    with_rule_id => rule_id: String,
    with_action => action: WafAction,
    with_override_action => override_action: WafOverrideAction,
    with_type => rule_type: WafRuleType,
    with_excluded_rules => excluded_rules: Vec<ExcludedRule>,
});

impl UpdatePayload for ActivatedRule {
    const FIELD: &'static str = "ActivatedRule";
}

impl Validate for ActivatedRule {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("ActivatedRule.Priority", &self.priority)?;
        check_required_identifier("ActivatedRule.RuleId", &self.rule_id)?;

        if self.action.is_some() && self.override_action.is_some() {
            return Err(Error::ActionWithOverrideAction);
        }

        if self.is_group() {
            required("ActivatedRule.OverrideAction", &self.override_action)?.validate(config)?;
            self.excluded_rules.validate(config)
        } else {
            if self.override_action.is_some() {
                return Err(Error::OverrideActionOutsideGroup);
            }
            if self.excluded_rules.is_some() {
                return Err(Error::ExcludedRulesOutsideGroup);
            }

            required("ActivatedRule.Action", &self.action)?.validate(config)
        }
    }
}

/// Fails on the first priority used by more than one of the rules
pub fn check_unique_priorities<'a>(
    rules: impl IntoIterator<Item = &'a ActivatedRule>,
) -> Result<(), Error> {
    let mut seen = HashSet::new();

    rules
        .into_iter()
        .filter_map(|rule| rule.priority)
        .try_for_each(|priority| match seen.insert(priority) {
            true => Ok(()),
            false => Err(Error::DuplicatePriority(priority)),
        })
}

/// Priorities have to stay unique among the rules a single batch inserts
pub fn check_inserted_priorities(updates: &[Update<ActivatedRule>]) -> Result<(), Error> {
    check_unique_priorities(
        updates
            .iter()
            .filter(|update| update.is_insert())
            .filter_map(|update| update.payload.as_ref()),
    )
}
