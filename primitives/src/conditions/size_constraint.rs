//! Size constraint conditions: the length of a part of the web request.
use crate::{
    config::Config,
    field_to_match::{FieldToMatch, MatchFieldType, TextTransformation},
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_optional_marker, check_optional_range, check_range, check_required_identifier,
        required, Error, Validate, LIST_LIMIT, SIZE,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// Used in an expression `Size ComparisonOperator size of FieldToMatch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

impl ComparisonOperator {
    /// Evaluates `size <operator> field_size`, in the order the service builds the expression
    pub fn compare(&self, size: i64, field_size: i64) -> bool {
        match self {
            Self::Eq => size == field_size,
            Self::Ne => size != field_size,
            Self::Le => size <= field_size,
            Self::Lt => size < field_size,
            Self::Ge => size >= field_size,
            Self::Gt => size > field_size,
        }
    }
}

/// The service matches when `Size ComparisonOperator <size in bytes of FieldToMatch>` is true.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SizeConstraint {
    pub field_to_match: Option<FieldToMatch>,
    /// Applied before the size is measured, has to be `NONE` for the `BODY`
    pub text_transformation: Option<TextTransformation>,
    pub comparison_operator: Option<ComparisonOperator>,
    /// In bytes, `0..=21474836480` (i.e. 20 GiB)
    pub size: Option<i64>,
}

impl SizeConstraint {
    pub fn new(
        field_to_match: FieldToMatch,
        text_transformation: TextTransformation,
        comparison_operator: ComparisonOperator,
        size: i64,
    ) -> Self {
        Self {
            field_to_match: Some(field_to_match),
            text_transformation: Some(text_transformation),
            comparison_operator: Some(comparison_operator),
            size: Some(size),
        }
    }
}

fluent_setters!(SizeConstraint {
    with_field_to_match => field_to_match: FieldToMatch,
    with_text_transformation => text_transformation: TextTransformation,
    with_comparison_operator => comparison_operator: ComparisonOperator,
    with_size => size: i64,
});

impl UpdatePayload for SizeConstraint {
    const FIELD: &'static str = "SizeConstraint";
}

impl Validate for SizeConstraint {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        let field_to_match = required("SizeConstraint.FieldToMatch", &self.field_to_match)?;
        field_to_match.validate(config)?;

        let transformation =
            required("SizeConstraint.TextTransformation", &self.text_transformation)?;
        if field_to_match.match_type == Some(MatchFieldType::Body)
            && *transformation != TextTransformation::None
        {
            return Err(Error::TransformedBody);
        }


        required("SizeConstraint.ComparisonOperator", &self.comparison_operator)?;
        let size = required("SizeConstraint.Size", &self.size)?;

        check_range("SizeConstraint.Size", *size, SIZE)
    }
}

/// The parts of web requests to check for length & the length to compare them with
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SizeConstraintSet {
    pub size_constraint_set_id: Option<String>,
    pub name: Option<String>,
    pub size_constraints: Option<Vec<SizeConstraint>>,
}

fluent_setters!(SizeConstraintSet {
    with_id => size_constraint_set_id: String,
    with_name => name: String,
    with_size_constraints => size_constraints: Vec<SizeConstraint>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SizeConstraintSetSummary {
    pub size_constraint_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(SizeConstraintSetSummary {
    with_size_constraint_set_id => size_constraint_set_id: String,
    with_name => name: String,
});

pub type SizeConstraintSetUpdate = Update<SizeConstraint>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSizeConstraintSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateSizeConstraintSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateSizeConstraintSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSizeConstraintSetResponse {
    pub size_constraint_set: Option<SizeConstraintSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateSizeConstraintSetRequest => CreateSizeConstraintSetResponse, "CreateSizeConstraintSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSizeConstraintSetRequest {
    pub size_constraint_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteSizeConstraintSetRequest {
    with_size_constraint_set_id => size_constraint_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteSizeConstraintSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("SizeConstraintSetId", &self.size_constraint_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSizeConstraintSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteSizeConstraintSetRequest => DeleteSizeConstraintSetResponse, "DeleteSizeConstraintSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSizeConstraintSetRequest {
    pub size_constraint_set_id: Option<String>,
}

fluent_setters!(GetSizeConstraintSetRequest {
    with_size_constraint_set_id => size_constraint_set_id: String,
});

impl Validate for GetSizeConstraintSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("SizeConstraintSetId", &self.size_constraint_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSizeConstraintSetResponse {
    pub size_constraint_set: Option<SizeConstraintSet>,
}

impl_operation!(GetSizeConstraintSetRequest => GetSizeConstraintSetResponse, "GetSizeConstraintSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSizeConstraintSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListSizeConstraintSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListSizeConstraintSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListSizeConstraintSetsResponse {
    pub next_marker: Option<String>,
    pub size_constraint_sets: Option<Vec<SizeConstraintSetSummary>>,
}

impl_operation!(ListSizeConstraintSetsRequest => ListSizeConstraintSetsResponse, "ListSizeConstraintSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSizeConstraintSetRequest {
    pub size_constraint_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<SizeConstraintSetUpdate>>,
}

fluent_setters!(UpdateSizeConstraintSetRequest {
    with_size_constraint_set_id => size_constraint_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<SizeConstraintSetUpdate>,
});

impl_update_set!(UpdateSizeConstraintSetRequest, SizeConstraint, size_constraint_set_id, "SizeConstraintSetId");

impl Validate for UpdateSizeConstraintSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSizeConstraintSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateSizeConstraintSetRequest => UpdateSizeConstraintSetResponse, "UpdateSizeConstraintSet");

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GLOBAL_CONFIG;
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};

    fn body_limit(size: i64) -> SizeConstraint {
        SizeConstraint::new(
            FieldToMatch::new(MatchFieldType::Body),
            TextTransformation::None,
            ComparisonOperator::Gt,
            size,
        )
    }

    #[test]
    fn size_boundaries() {
        let config = &*GLOBAL_CONFIG;

        assert_eq!(Ok(()), body_limit(0).validate(config));
        assert_eq!(Ok(()), body_limit(21_474_836_480).validate(config));
        assert!(matches!(
            body_limit(21_474_836_481).validate(config),
            Err(Error::OutOfRange { field: "SizeConstraint.Size", .. })
        ));
        assert!(body_limit(-1).validate(config).is_err());
    }

    #[test]
    fn body_is_measured_untransformed() {
        let config = &*GLOBAL_CONFIG;

        assert_eq!(
            Err(Error::TransformedBody),
            body_limit(4096)
                .with_text_transformation(TextTransformation::CmdLine)
                .validate(config)
        );

        let command_line = SizeConstraint::new(
            FieldToMatch::new(MatchFieldType::QueryString),
            TextTransformation::CmdLine,
            ComparisonOperator::Ge,
            512,
        );
        assert_eq!(Ok(()), command_line.validate(config));
    }

    #[test]
    fn comparison_reads_size_first() {
        // 4096 > body of 100 bytes
        assert!(ComparisonOperator::Gt.compare(4096, 100));
        assert!(!ComparisonOperator::Lt.compare(4096, 100));
        assert!(ComparisonOperator::Eq.compare(7, 7));
        assert!(ComparisonOperator::Ge.compare(7, 7));
        assert!(!ComparisonOperator::Ne.compare(7, 7));
    }

    #[test]
    fn setters_and_fluent_chain_agree() {
        let mut assigned = SizeConstraint::default();
        assigned.field_to_match = Some(FieldToMatch::new(MatchFieldType::Body));
        assigned.text_transformation = Some(TextTransformation::None);
        assigned.comparison_operator = Some(ComparisonOperator::Gt);
        assigned.size = Some(4096);

        let chained = SizeConstraint::default()
            .with_field_to_match(FieldToMatch::new(MatchFieldType::Body))
            .with_text_transformation(TextTransformation::None)
            .with_comparison_operator(ComparisonOperator::Gt)
            .with_size(4096);

        assert_eq!(assigned, chained);
        assert_eq!(body_limit(4096), chained);
    }

    #[test]
    fn wire_format() {
        let expected = json!({
            "FieldToMatch": { "Type": "BODY" },
            "TextTransformation": "NONE",
            "ComparisonOperator": "GT",
            "Size": 21_474_836_480_i64
        });

        assert_eq!(expected, to_value(body_limit(21_474_836_480)).unwrap());
        assert_eq!(
            body_limit(21_474_836_480),
            serde_json::from_value::<SizeConstraint>(expected).unwrap()
        );
    }
}
