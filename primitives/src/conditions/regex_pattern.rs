//! Regex pattern sets: the regular expressions that [`RegexMatchTuple`]s refer to.
//!
//! [`RegexMatchTuple`]: crate::regex_match::RegexMatchTuple
use crate::{
    config::Config,
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_length, check_optional_marker, check_optional_range, check_required_identifier, Error,
        Validate, LIST_LIMIT, REGEX_PATTERN_LENGTH,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A regular expression, e.g. `B[a@]dB[o0]t`. Serialized as a bare JSON string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegexPatternString(pub String);

impl RegexPatternString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegexPatternString {
    fn from(pattern: &str) -> Self {
        Self(pattern.to_string())
    }
}

impl From<String> for RegexPatternString {
    fn from(pattern: String) -> Self {
        Self(pattern)
    }
}

impl fmt::Display for RegexPatternString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl UpdatePayload for RegexPatternString {
    const FIELD: &'static str = "RegexPatternString";
}

impl Validate for RegexPatternString {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_length("RegexPatternString", self.0.chars().count(), REGEX_PATTERN_LENGTH)
    }
}

/// Regular expressions to search for in web requests, such as `B[a@]dB[o0]t`
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexPatternSet {
    pub regex_pattern_set_id: Option<String>,
    pub name: Option<String>,
    pub regex_pattern_strings: Option<Vec<RegexPatternString>>,
}

fluent_setters!(RegexPatternSet {
    with_id => regex_pattern_set_id: String,
    with_name => name: String,
    with_regex_pattern_strings => regex_pattern_strings: Vec<RegexPatternString>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegexPatternSetSummary {
    pub regex_pattern_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(RegexPatternSetSummary {
    with_regex_pattern_set_id => regex_pattern_set_id: String,
    with_name => name: String,
});

pub type RegexPatternSetUpdate = Update<RegexPatternString>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRegexPatternSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateRegexPatternSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateRegexPatternSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRegexPatternSetResponse {
    pub regex_pattern_set: Option<RegexPatternSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateRegexPatternSetRequest => CreateRegexPatternSetResponse, "CreateRegexPatternSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRegexPatternSetRequest {
    pub regex_pattern_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteRegexPatternSetRequest {
    with_regex_pattern_set_id => regex_pattern_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteRegexPatternSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RegexPatternSetId", &self.regex_pattern_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRegexPatternSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteRegexPatternSetRequest => DeleteRegexPatternSetResponse, "DeleteRegexPatternSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRegexPatternSetRequest {
    pub regex_pattern_set_id: Option<String>,
}

fluent_setters!(GetRegexPatternSetRequest {
    with_regex_pattern_set_id => regex_pattern_set_id: String,
});

impl Validate for GetRegexPatternSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("RegexPatternSetId", &self.regex_pattern_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRegexPatternSetResponse {
    pub regex_pattern_set: Option<RegexPatternSet>,
}

impl_operation!(GetRegexPatternSetRequest => GetRegexPatternSetResponse, "GetRegexPatternSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRegexPatternSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListRegexPatternSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListRegexPatternSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListRegexPatternSetsResponse {
    pub next_marker: Option<String>,
    pub regex_pattern_sets: Option<Vec<RegexPatternSetSummary>>,
}

impl_operation!(ListRegexPatternSetsRequest => ListRegexPatternSetsResponse, "ListRegexPatternSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRegexPatternSetRequest {
    pub regex_pattern_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<RegexPatternSetUpdate>>,
}

fluent_setters!(UpdateRegexPatternSetRequest {
    with_regex_pattern_set_id => regex_pattern_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<RegexPatternSetUpdate>,
});

impl_update_set!(UpdateRegexPatternSetRequest, RegexPatternString, regex_pattern_set_id, "RegexPatternSetId");

impl Validate for UpdateRegexPatternSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateRegexPatternSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateRegexPatternSetRequest => UpdateRegexPatternSetResponse, "UpdateRegexPatternSet");

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::GLOBAL_CONFIG, test_util::CHANGE_TOKEN, update::UpdateSetRequest};
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};

    #[test]
    fn pattern_is_a_bare_string_on_the_wire() {
        let request = UpdateRegexPatternSetRequest::default()
            .with_regex_pattern_set_id("12cs345-67cd-890b-1cd2-c3a4567d89f1")
            .with_change_token(CHANGE_TOKEN)
            .insert("B[a@]dB[o0]t");

        assert_eq!(
            json!({
                "RegexPatternSetId": "12cs345-67cd-890b-1cd2-c3a4567d89f1",
                "ChangeToken": CHANGE_TOKEN,
                "Updates": [
                    { "Action": "INSERT", "RegexPatternString": "B[a@]dB[o0]t" }
                ]
            }),
            to_value(&request).expect("Should serialize")
        );
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
    }

    #[test]
    fn pattern_length() {
        let config = &*GLOBAL_CONFIG;

        assert_eq!(Ok(()), RegexPatternString::from("x".repeat(512)).validate(config));
        assert_eq!(
            Err(Error::Length {
                field: "RegexPatternString",
                length: 513,
                min: 1,
                max: 512,
            }),
            RegexPatternString::from("x".repeat(513)).validate(config)
        );
        assert!(RegexPatternString::default().validate(config).is_err());
    }

    #[test]
    fn get_response() {
        let json = json!({
            "RegexPatternSet": {
                "RegexPatternSetId": "12cs345-67cd-890b-1cd2-c3a4567d89f1",
                "Name": "BadBot",
                "RegexPatternStrings": ["B[a@]dB[o0]t", "[Bb]ad[Bb]ot"]
            }
        });

        let response: GetRegexPatternSetResponse =
            serde_json::from_value(json).expect("Should deserialize");
        let set = response.regex_pattern_set.expect("Should have the set");

        assert_eq!(
            Some(vec![
                RegexPatternString::from("B[a@]dB[o0]t"),
                RegexPatternString::from("[Bb]ad[Bb]ot"),
            ]),
            set.regex_pattern_strings
        );
    }
}
