//! Cross-site scripting match conditions.
use crate::{
    config::Config,
    field_to_match::{FieldToMatch, TextTransformation},
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_optional_marker, check_optional_range, check_required_identifier, required, Error,
        Validate, LIST_LIMIT,
    },
};
use serde::{Deserialize, Serialize};

/// The part of a web request inspected for cross-site scripting attacks
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XssMatchTuple {
    pub field_to_match: Option<FieldToMatch>,
    pub text_transformation: Option<TextTransformation>,
}

impl XssMatchTuple {
    pub fn new(field_to_match: FieldToMatch, text_transformation: TextTransformation) -> Self {
        Self {
            field_to_match: Some(field_to_match),
            text_transformation: Some(text_transformation),
        }
    }
}

fluent_setters!(XssMatchTuple {
    with_field_to_match => field_to_match: FieldToMatch,
    with_text_transformation => text_transformation: TextTransformation,
});

impl UpdatePayload for XssMatchTuple {
    const FIELD: &'static str = "XssMatchTuple";
}

impl Validate for XssMatchTuple {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("XssMatchTuple.FieldToMatch", &self.field_to_match)?.validate(config)?;
        required("XssMatchTuple.TextTransformation", &self.text_transformation)?;

        Ok(())
    }
}

/// The parts of web requests inspected for cross-site scripting attacks
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XssMatchSet {
    pub xss_match_set_id: Option<String>,
    pub name: Option<String>,
    pub xss_match_tuples: Option<Vec<XssMatchTuple>>,
}

fluent_setters!(XssMatchSet {
    with_id => xss_match_set_id: String,
    with_name => name: String,
    with_xss_match_tuples => xss_match_tuples: Vec<XssMatchTuple>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XssMatchSetSummary {
    pub xss_match_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(XssMatchSetSummary {
    with_xss_match_set_id => xss_match_set_id: String,
    with_name => name: String,
});

pub type XssMatchSetUpdate = Update<XssMatchTuple>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateXssMatchSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateXssMatchSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateXssMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateXssMatchSetResponse {
    pub xss_match_set: Option<XssMatchSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateXssMatchSetRequest => CreateXssMatchSetResponse, "CreateXssMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteXssMatchSetRequest {
    pub xss_match_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteXssMatchSetRequest {
    with_xss_match_set_id => xss_match_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteXssMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("XssMatchSetId", &self.xss_match_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteXssMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteXssMatchSetRequest => DeleteXssMatchSetResponse, "DeleteXssMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetXssMatchSetRequest {
    pub xss_match_set_id: Option<String>,
}

fluent_setters!(GetXssMatchSetRequest {
    with_xss_match_set_id => xss_match_set_id: String,
});

impl Validate for GetXssMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("XssMatchSetId", &self.xss_match_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetXssMatchSetResponse {
    pub xss_match_set: Option<XssMatchSet>,
}

impl_operation!(GetXssMatchSetRequest => GetXssMatchSetResponse, "GetXssMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListXssMatchSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListXssMatchSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListXssMatchSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListXssMatchSetsResponse {
    pub next_marker: Option<String>,
    pub xss_match_sets: Option<Vec<XssMatchSetSummary>>,
}

impl_operation!(ListXssMatchSetsRequest => ListXssMatchSetsResponse, "ListXssMatchSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateXssMatchSetRequest {
    pub xss_match_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<XssMatchSetUpdate>>,
}

fluent_setters!(UpdateXssMatchSetRequest {
    with_xss_match_set_id => xss_match_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<XssMatchSetUpdate>,
});

impl_update_set!(UpdateXssMatchSetRequest, XssMatchTuple, xss_match_set_id, "XssMatchSetId");

impl Validate for UpdateXssMatchSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateXssMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateXssMatchSetRequest => UpdateXssMatchSetResponse, "UpdateXssMatchSet");

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        config::{DuplicatePolicy, GLOBAL_CONFIG},
        field_to_match::MatchFieldType,
        test_util::CHANGE_TOKEN,
        update::UpdateSetRequest,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_entries_follow_the_configured_policy() {
        let tuple = XssMatchTuple::new(
            FieldToMatch::new(MatchFieldType::Uri),
            TextTransformation::UrlDecode,
        );
        let request = UpdateXssMatchSetRequest::default()
            .with_xss_match_set_id("example1ds3t-46da-4fdb-b8d5-abc321j569j5")
            .with_change_token(CHANGE_TOKEN)
            .insert(tuple.clone())
            .insert(tuple);

        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));

        let mut strict = GLOBAL_CONFIG.clone();
        strict.duplicate_updates = DuplicatePolicy::Reject;
        assert_eq!(Err(Error::DuplicateUpdate(1)), request.validate(&strict));
    }

    #[test]
    fn get_response_round_trip() {
        let json = serde_json::json!({
            "XssMatchSet": {
                "XssMatchSetId": "example1ds3t-46da-4fdb-b8d5-abc321j569j5",
                "Name": "MySampleXssMatchSet",
                "XssMatchTuples": [
                    {
                        "FieldToMatch": { "Type": "QUERY_STRING" },
                        "TextTransformation": "URL_DECODE"
                    }
                ]
            }
        });

        let response: GetXssMatchSetResponse =
            serde_json::from_value(json.clone()).expect("Should deserialize");
        assert_eq!(json, serde_json::to_value(&response).expect("Should serialize"));
    }
}
