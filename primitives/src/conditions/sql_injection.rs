//! SQL injection match conditions: parts of the web request that may contain malicious SQL code.
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

/// The part of a web request inspected for malicious SQL code
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqlInjectionMatchTuple {
    pub field_to_match: Option<FieldToMatch>,
    pub text_transformation: Option<TextTransformation>,
}

impl SqlInjectionMatchTuple {
    pub fn new(field_to_match: FieldToMatch, text_transformation: TextTransformation) -> Self {
        Self {
            field_to_match: Some(field_to_match),
            text_transformation: Some(text_transformation),
        }
    }
}

fluent_setters!(SqlInjectionMatchTuple {
    with_field_to_match => field_to_match: FieldToMatch,
    with_text_transformation => text_transformation: TextTransformation,
});

impl UpdatePayload for SqlInjectionMatchTuple {
    const FIELD: &'static str = "SqlInjectionMatchTuple";
}

impl Validate for SqlInjectionMatchTuple {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("SqlInjectionMatchTuple.FieldToMatch", &self.field_to_match)?.validate(config)?;
        required("SqlInjectionMatchTuple.TextTransformation", &self.text_transformation)?;

        Ok(())
    }
}

/// The parts of web requests inspected for malicious SQL code
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqlInjectionMatchSet {
    pub sql_injection_match_set_id: Option<String>,
    pub name: Option<String>,
    pub sql_injection_match_tuples: Option<Vec<SqlInjectionMatchTuple>>,
}

fluent_setters!(SqlInjectionMatchSet {
    with_id => sql_injection_match_set_id: String,
    with_name => name: String,
    with_sql_injection_match_tuples => sql_injection_match_tuples: Vec<SqlInjectionMatchTuple>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqlInjectionMatchSetSummary {
    pub sql_injection_match_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(SqlInjectionMatchSetSummary {
    with_sql_injection_match_set_id => sql_injection_match_set_id: String,
    with_name => name: String,
});

pub type SqlInjectionMatchSetUpdate = Update<SqlInjectionMatchTuple>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSqlInjectionMatchSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateSqlInjectionMatchSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateSqlInjectionMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSqlInjectionMatchSetResponse {
    pub sql_injection_match_set: Option<SqlInjectionMatchSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateSqlInjectionMatchSetRequest => CreateSqlInjectionMatchSetResponse, "CreateSqlInjectionMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSqlInjectionMatchSetRequest {
    pub sql_injection_match_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteSqlInjectionMatchSetRequest {
    with_sql_injection_match_set_id => sql_injection_match_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteSqlInjectionMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("SqlInjectionMatchSetId", &self.sql_injection_match_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSqlInjectionMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteSqlInjectionMatchSetRequest => DeleteSqlInjectionMatchSetResponse, "DeleteSqlInjectionMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSqlInjectionMatchSetRequest {
    pub sql_injection_match_set_id: Option<String>,
}

fluent_setters!(GetSqlInjectionMatchSetRequest {
    with_sql_injection_match_set_id => sql_injection_match_set_id: String,
});

impl Validate for GetSqlInjectionMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("SqlInjectionMatchSetId", &self.sql_injection_match_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSqlInjectionMatchSetResponse {
    pub sql_injection_match_set: Option<SqlInjectionMatchSet>,
}

impl_operation!(GetSqlInjectionMatchSetRequest => GetSqlInjectionMatchSetResponse, "GetSqlInjectionMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSqlInjectionMatchSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListSqlInjectionMatchSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListSqlInjectionMatchSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSqlInjectionMatchSetsResponse {
    pub next_marker: Option<String>,
    pub sql_injection_match_sets: Option<Vec<SqlInjectionMatchSetSummary>>,
}

impl_operation!(ListSqlInjectionMatchSetsRequest => ListSqlInjectionMatchSetsResponse, "ListSqlInjectionMatchSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSqlInjectionMatchSetRequest {
    pub sql_injection_match_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<SqlInjectionMatchSetUpdate>>,
}

fluent_setters!(UpdateSqlInjectionMatchSetRequest {
    with_sql_injection_match_set_id => sql_injection_match_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<SqlInjectionMatchSetUpdate>,
});

impl_update_set!(UpdateSqlInjectionMatchSetRequest, SqlInjectionMatchTuple, sql_injection_match_set_id, "SqlInjectionMatchSetId");

impl Validate for UpdateSqlInjectionMatchSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSqlInjectionMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateSqlInjectionMatchSetRequest => UpdateSqlInjectionMatchSetResponse, "UpdateSqlInjectionMatchSet");
