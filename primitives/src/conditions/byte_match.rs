//! Byte match conditions: a string looked up in a part of the web request.
use crate::{
    config::Config,
    field_to_match::{FieldToMatch, TextTransformation},
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_length, check_optional_marker, check_optional_range, check_required_identifier,
        required, Error, Validate, LIST_LIMIT, TARGET_STRING_LENGTH,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// Where in the inspected part the target string has to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum PositionalConstraint {
    /// The value is identical to the target string
    Exactly,
    StartsWith,
    EndsWith,
    /// The target string appears anywhere in the value
    Contains,
    /// The target string appears as a word, i.e. delimited by non-alphanumeric characters
    /// (or the start & end of the value)
    ContainsWord,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByteMatchTuple {
    pub field_to_match: Option<FieldToMatch>,
    /// Raw bytes, base64-encoded on the wire
    #[serde(default, with = "crate::util::serde::base64_option")]
    pub target_string: Option<Vec<u8>>,
    pub text_transformation: Option<TextTransformation>,
    pub positional_constraint: Option<PositionalConstraint>,
}

impl ByteMatchTuple {
    pub fn new(
        field_to_match: FieldToMatch,
        target_string: impl Into<Vec<u8>>,
        text_transformation: TextTransformation,
        positional_constraint: PositionalConstraint,
    ) -> Self {
        Self {
            field_to_match: Some(field_to_match),
            target_string: Some(target_string.into()),
            text_transformation: Some(text_transformation),
            positional_constraint: Some(positional_constraint),
        }
    }
}

fluent_setters!(ByteMatchTuple {
    with_field_to_match => field_to_match: FieldToMatch,
    with_target_string => target_string: Vec<u8>,
    with_text_transformation => text_transformation: TextTransformation,
    with_positional_constraint => positional_constraint: PositionalConstraint,
});

impl UpdatePayload for ByteMatchTuple {
    const FIELD: &'static str = "ByteMatchTuple";
}

impl Validate for ByteMatchTuple {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("ByteMatchTuple.FieldToMatch", &self.field_to_match)?.validate(config)?;

        let target_string = required("ByteMatchTuple.TargetString", &self.target_string)?;
        check_length(
            "ByteMatchTuple.TargetString",
            target_string.len(),
            TARGET_STRING_LENGTH,
        )?;

        required("ByteMatchTuple.TextTransformation", &self.text_transformation)?;
        required("ByteMatchTuple.PositionalConstraint", &self.positional_constraint)?;

        Ok(())
    }
}

/// Strings to look for in web requests & where to look for them
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByteMatchSet {
    pub byte_match_set_id: Option<String>,
    pub name: Option<String>,
    pub byte_match_tuples: Option<Vec<ByteMatchTuple>>,
}

fluent_setters!(ByteMatchSet {
    with_id => byte_match_set_id: String,
    with_name => name: String,
    with_byte_match_tuples => byte_match_tuples: Vec<ByteMatchTuple>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByteMatchSetSummary {
    pub byte_match_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(ByteMatchSetSummary {
    with_byte_match_set_id => byte_match_set_id: String,
    with_name => name: String,
});

pub type ByteMatchSetUpdate = Update<ByteMatchTuple>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateByteMatchSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateByteMatchSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateByteMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateByteMatchSetResponse {
    pub byte_match_set: Option<ByteMatchSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateByteMatchSetRequest => CreateByteMatchSetResponse, "CreateByteMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteByteMatchSetRequest {
    pub byte_match_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteByteMatchSetRequest {
    with_byte_match_set_id => byte_match_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteByteMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("ByteMatchSetId", &self.byte_match_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteByteMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteByteMatchSetRequest => DeleteByteMatchSetResponse, "DeleteByteMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetByteMatchSetRequest {
    pub byte_match_set_id: Option<String>,
}

fluent_setters!(GetByteMatchSetRequest {
    with_byte_match_set_id => byte_match_set_id: String,
});

impl Validate for GetByteMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("ByteMatchSetId", &self.byte_match_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetByteMatchSetResponse {
    pub byte_match_set: Option<ByteMatchSet>,
}

impl_operation!(GetByteMatchSetRequest => GetByteMatchSetResponse, "GetByteMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListByteMatchSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListByteMatchSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListByteMatchSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListByteMatchSetsResponse {
    pub next_marker: Option<String>,
    pub byte_match_sets: Option<Vec<ByteMatchSetSummary>>,
}

impl_operation!(ListByteMatchSetsRequest => ListByteMatchSetsResponse, "ListByteMatchSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateByteMatchSetRequest {
    pub byte_match_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<ByteMatchSetUpdate>>,
}

fluent_setters!(UpdateByteMatchSetRequest {
    with_byte_match_set_id => byte_match_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<ByteMatchSetUpdate>,
});

impl_update_set!(UpdateByteMatchSetRequest, ByteMatchTuple, byte_match_set_id, "ByteMatchSetId");

impl Validate for UpdateByteMatchSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateByteMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateByteMatchSetRequest => UpdateByteMatchSetResponse, "UpdateByteMatchSet");
