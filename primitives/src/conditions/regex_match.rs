//! Regex match conditions: a part of the web request matched against a [`RegexPatternSet`].
//!
//! [`RegexPatternSet`]: crate::regex_pattern::RegexPatternSet
use crate::{
    config::Config,
    field_to_match::{FieldToMatch, TextTransformation},
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_identifier, check_optional_marker, check_optional_range, check_required_identifier,
        required, Error, Validate, LIST_LIMIT,
    },
};
use serde::{Deserialize, Serialize};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexMatchTuple {
    pub field_to_match: Option<FieldToMatch>,
    pub text_transformation: Option<TextTransformation>,
    /// The [`RegexPatternSet`](crate::regex_pattern::RegexPatternSet) whose patterns are searched for
    pub regex_pattern_set_id: Option<String>,
}

impl RegexMatchTuple {
    pub fn new(
        field_to_match: FieldToMatch,
        text_transformation: TextTransformation,
        regex_pattern_set_id: impl Into<String>,
    ) -> Self {
        Self {
            field_to_match: Some(field_to_match),
            text_transformation: Some(text_transformation),
            regex_pattern_set_id: Some(regex_pattern_set_id.into()),
        }
    }
}

fluent_setters!(RegexMatchTuple {
    with_field_to_match => field_to_match: FieldToMatch,
    with_text_transformation => text_transformation: TextTransformation,
    with_regex_pattern_set_id => regex_pattern_set_id: String,
});

impl UpdatePayload for RegexMatchTuple {
    const FIELD: &'static str = "RegexMatchTuple";
}

impl Validate for RegexMatchTuple {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("RegexMatchTuple.FieldToMatch", &self.field_to_match)?.validate(config)?;
        required("RegexMatchTuple.TextTransformation", &self.text_transformation)?;
        let pattern_set = required("RegexMatchTuple.RegexPatternSetId", &self.regex_pattern_set_id)?;

        check_identifier("RegexMatchTuple.RegexPatternSetId", pattern_set)
    }
}

/// The parts of web requests inspected for patterns of a regex pattern set
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexMatchSet {
    pub regex_match_set_id: Option<String>,
    pub name: Option<String>,
    pub regex_match_tuples: Option<Vec<RegexMatchTuple>>,
}

fluent_setters!(RegexMatchSet {
    with_id => regex_match_set_id: String,
    with_name => name: String,
    with_regex_match_tuples => regex_match_tuples: Vec<RegexMatchTuple>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexMatchSetSummary {
    pub regex_match_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(RegexMatchSetSummary {
    with_regex_match_set_id => regex_match_set_id: String,
    with_name => name: String,
});

pub type RegexMatchSetUpdate = Update<RegexMatchTuple>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRegexMatchSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateRegexMatchSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateRegexMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRegexMatchSetResponse {
    pub regex_match_set: Option<RegexMatchSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateRegexMatchSetRequest => CreateRegexMatchSetResponse, "CreateRegexMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRegexMatchSetRequest {
    pub regex_match_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteRegexMatchSetRequest {
    with_regex_match_set_id => regex_match_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteRegexMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RegexMatchSetId", &self.regex_match_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRegexMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteRegexMatchSetRequest => DeleteRegexMatchSetResponse, "DeleteRegexMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRegexMatchSetRequest {
    pub regex_match_set_id: Option<String>,
}

fluent_setters!(GetRegexMatchSetRequest {
    with_regex_match_set_id => regex_match_set_id: String,
});

impl Validate for GetRegexMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RegexMatchSetId", &self.regex_match_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRegexMatchSetResponse {
    pub regex_match_set: Option<RegexMatchSet>,
}

impl_operation!(GetRegexMatchSetRequest => GetRegexMatchSetResponse, "GetRegexMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRegexMatchSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListRegexMatchSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListRegexMatchSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRegexMatchSetsResponse {
    pub next_marker: Option<String>,
    pub regex_match_sets: Option<Vec<RegexMatchSetSummary>>,
}

impl_operation!(ListRegexMatchSetsRequest => ListRegexMatchSetsResponse, "ListRegexMatchSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRegexMatchSetRequest {
    pub regex_match_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<RegexMatchSetUpdate>>,
}

fluent_setters!(UpdateRegexMatchSetRequest {
    with_regex_match_set_id => regex_match_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<RegexMatchSetUpdate>,
});

impl_update_set!(UpdateRegexMatchSetRequest, RegexMatchTuple, regex_match_set_id, "RegexMatchSetId");

impl Validate for UpdateRegexMatchSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRegexMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateRegexMatchSetRequest => UpdateRegexMatchSetResponse, "UpdateRegexMatchSet");
