//! Geo match conditions: the country a web request originates from.
use crate::{
    config::Config,
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_optional_marker, check_optional_range, check_required_identifier, required, Error,
        Validate, LIST_LIMIT,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str};
use thiserror::Error;

/// The only type of geo match constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
pub enum GeoMatchConstraintType {
    Country,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("`{0}` is not a two letter upper-case country code")]
pub struct InvalidCountryCode(String);

/// ISO 3166-1 alpha-2 country code, e.g. `US`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl str::FromStr for CountryCode {
    type Err = InvalidCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.bytes().all(|byte| byte.is_ascii_uppercase()) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidCountryCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for CountryCode {
    type Error = InvalidCountryCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoMatchConstraint {
    #[serde(rename = "Type")]
    pub constraint_type: Option<GeoMatchConstraintType>,
    pub value: Option<CountryCode>,
}

impl GeoMatchConstraint {
    pub fn country(code: CountryCode) -> Self {
        Self {
            constraint_type: Some(GeoMatchConstraintType::Country),
            value: Some(code),
        }
    }
}

fluent_setters!(GeoMatchConstraint {
    with_type => constraint_type: GeoMatchConstraintType,
    with_value => value: CountryCode,
});

impl UpdatePayload for GeoMatchConstraint {
    const FIELD: &'static str = "GeoMatchConstraint";
}

impl Validate for GeoMatchConstraint {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        required("GeoMatchConstraint.Type", &self.constraint_type)?;
        required("GeoMatchConstraint.Value", &self.value)?;

        Ok(())
    }
}

/// The countries that web requests originate from
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoMatchSet {
    pub geo_match_set_id: Option<String>,
    pub name: Option<String>,
    pub geo_match_constraints: Option<Vec<GeoMatchConstraint>>,
}

fluent_setters!(GeoMatchSet {
    with_id => geo_match_set_id: String,
    with_name => name: String,
    with_geo_match_constraints => geo_match_constraints: Vec<GeoMatchConstraint>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoMatchSetSummary {
    pub geo_match_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(GeoMatchSetSummary {
    with_geo_match_set_id => geo_match_set_id: String,
    with_name => name: String,
});

pub type GeoMatchSetUpdate = Update<GeoMatchConstraint>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGeoMatchSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateGeoMatchSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateGeoMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGeoMatchSetResponse {
    pub geo_match_set: Option<GeoMatchSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateGeoMatchSetRequest => CreateGeoMatchSetResponse, "CreateGeoMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteGeoMatchSetRequest {
    pub geo_match_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteGeoMatchSetRequest {
    with_geo_match_set_id => geo_match_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteGeoMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("GeoMatchSetId", &self.geo_match_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteGeoMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteGeoMatchSetRequest => DeleteGeoMatchSetResponse, "DeleteGeoMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetGeoMatchSetRequest {
    pub geo_match_set_id: Option<String>,
}

fluent_setters!(GetGeoMatchSetRequest {
    with_geo_match_set_id => geo_match_set_id: String,
});

impl Validate for GetGeoMatchSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("GeoMatchSetId", &self.geo_match_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetGeoMatchSetResponse {
    pub geo_match_set: Option<GeoMatchSet>,
}

impl_operation!(GetGeoMatchSetRequest => GetGeoMatchSetResponse, "GetGeoMatchSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListGeoMatchSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListGeoMatchSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListGeoMatchSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListGeoMatchSetsResponse {
    pub next_marker: Option<String>,
    pub geo_match_sets: Option<Vec<GeoMatchSetSummary>>,
}

impl_operation!(ListGeoMatchSetsRequest => ListGeoMatchSetsResponse, "ListGeoMatchSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateGeoMatchSetRequest {
    pub geo_match_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<GeoMatchSetUpdate>>,
}

fluent_setters!(UpdateGeoMatchSetRequest {
    with_geo_match_set_id => geo_match_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<GeoMatchSetUpdate>,
});

impl_update_set!(UpdateGeoMatchSetRequest, GeoMatchConstraint, geo_match_set_id, "GeoMatchSetId");

impl Validate for UpdateGeoMatchSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateGeoMatchSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateGeoMatchSetRequest => UpdateGeoMatchSetResponse, "UpdateGeoMatchSet");

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};

    #[test]
    fn country_codes() {
        let us: CountryCode = "US".parse().expect("Should parse");
        assert_eq!("US", us.to_string());

        assert_eq!(Err(InvalidCountryCode("us".into())), "us".parse::<CountryCode>());
        assert!("USA".parse::<CountryCode>().is_err());
        assert!("".parse::<CountryCode>().is_err());
    }

    #[test]
    fn constraint_wire_format() {
        let constraint = GeoMatchConstraint::country("BG".parse().expect("Should parse"));

        let expected = json!({ "Type": "Country", "Value": "BG" });
        assert_eq!(expected, to_value(&constraint).expect("Should serialize"));
        assert_eq!(
            constraint,
            serde_json::from_value(expected).expect("Should deserialize")
        );

        let lower_case = json!({ "Type": "Country", "Value": "bg" });
        assert!(serde_json::from_value::<GeoMatchConstraint>(lower_case).is_err());
    }

    #[test]
    fn get_geo_match_set_response() {
        let json = json!({
            "GeoMatchSet": {
                "GeoMatchSetId": "d9daaba9-example",
                "Name": "Blocked countries",
                "GeoMatchConstraints": [
                    { "Type": "Country", "Value": "KP" },
                    { "Type": "Country", "Value": "IR" }
                ]
            }
        });

        let response: GetGeoMatchSetResponse =
            serde_json::from_value(json.clone()).expect("Should deserialize");
        let constraints = response
            .geo_match_set
            .as_ref()
            .and_then(|set| set.geo_match_constraints.as_ref())
            .expect("Should have constraints");

        assert_eq!(2, constraints.len());
        assert_eq!(Some("KP"), constraints[0].value.as_ref().map(CountryCode::as_str));
        assert_eq!(json, to_value(&response).unwrap());
    }
}
