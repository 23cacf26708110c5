use crate::{
    config::Config,
    validator::{check_identifier, required, Error, Validate},
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// The part of a web request to inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum MatchFieldType {
    /// The path of the request, e.g. `/images/daily-ad.jpg`
    Uri,
    QueryString,
    /// A single header, named by [`FieldToMatch::data`]
    Header,
    /// `DELETE`, `GET`, `HEAD`, `OPTIONS`, `PATCH`, `POST` or `PUT`
    Method,
    /// Only the first 8192 bytes of the body are forwarded for inspection
    Body,
    /// A single query argument, named by [`FieldToMatch::data`]
    SingleQueryArg,
    AllQueryArgs,
}

impl MatchFieldType {
    /// `HEADER` & `SINGLE_QUERY_ARG` require a name in [`FieldToMatch::data`]
    pub fn requires_data(&self) -> bool {
        matches!(self, Self::Header | Self::SingleQueryArg)
    }
}

/// Normalization applied to the inspected part before it is matched.
/// Exactly one per match tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum TextTransformation {
    None,
    CompressWhiteSpace,
    HtmlEntityDecode,
    Lowercase,
    CmdLine,
    UrlDecode,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldToMatch {
    #[serde(rename = "Type")]
    pub match_type: Option<MatchFieldType>,
    /// The header or query argument name, case-insensitive.
    /// Ignored for every other [`MatchFieldType`]
    pub data: Option<String>,
}

impl FieldToMatch {
    pub fn new(match_type: MatchFieldType) -> Self {
        Self {
            match_type: Some(match_type),
            data: None,
        }
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(MatchFieldType::Header).with_data(name)
    }

    pub fn query_arg(name: impl Into<String>) -> Self {
        Self::new(MatchFieldType::SingleQueryArg).with_data(name)
    }
}

fluent_setters!(FieldToMatch {
    with_type => match_type: MatchFieldType,
    with_data => data: String,
});

impl Validate for FieldToMatch {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        let match_type = required("FieldToMatch.Type", &self.match_type)?;

        match (&self.data, match_type.requires_data()) {
            (Some(data), _) => check_identifier("FieldToMatch.Data", data),
            (None, true) => Err(Error::Missing("FieldToMatch.Data")),
            (None, false) => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GLOBAL_CONFIG;
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_and_hash() {
        let user_agent = FieldToMatch::header("User-Agent");
        let same = FieldToMatch {
            match_type: Some(MatchFieldType::Header),
            data: Some("User-Agent".into()),
        };

        assert_eq!(user_agent, same);
        assert_eq!(hash_of(&user_agent), hash_of(&same));

        let referer = user_agent.clone().with_data("Referer");
        assert_ne!(user_agent, referer);

        assert_eq!(FieldToMatch::default(), FieldToMatch::default());
        assert_eq!(hash_of(&FieldToMatch::default()), hash_of(&FieldToMatch::default()));
        assert_ne!(FieldToMatch::default(), FieldToMatch::new(MatchFieldType::Uri));
    }

    #[test]
    fn setters_and_fluent_chain_agree() {
        let mut assigned = FieldToMatch::default();
        assigned.match_type = Some(MatchFieldType::SingleQueryArg);
        assigned.data = Some("UserName".to_string());

        let chained = FieldToMatch::default()
            .with_type(MatchFieldType::SingleQueryArg)
            .with_data("UserName");

        assert_eq!(assigned, chained);
    }

    #[test]
    fn transformation_tokens() {
        let all = [
            (TextTransformation::None, "NONE"),
            (TextTransformation::CompressWhiteSpace, "COMPRESS_WHITE_SPACE"),
            (TextTransformation::HtmlEntityDecode, "HTML_ENTITY_DECODE"),
            (TextTransformation::Lowercase, "LOWERCASE"),
            (TextTransformation::CmdLine, "CMD_LINE"),
            (TextTransformation::UrlDecode, "URL_DECODE"),
        ];

        for (transformation, token) in all {
            assert_eq!(token, transformation.to_string());
            assert_eq!(json!(token), to_value(transformation).unwrap());
            assert_eq!(Some(transformation), token.parse::<TextTransformation>().ok());
        }
    }

    #[test]
    fn field_type_tokens() {
        assert_eq!("URI", MatchFieldType::Uri.to_string());
        assert_eq!("QUERY_STRING", MatchFieldType::QueryString.to_string());
        assert_eq!("SINGLE_QUERY_ARG", MatchFieldType::SingleQueryArg.to_string());
        assert_eq!(
            json!({ "Type": "ALL_QUERY_ARGS" }),
            to_value(FieldToMatch::new(MatchFieldType::AllQueryArgs)).unwrap()
        );
    }

    #[test]
    fn header_requires_a_name() {
        let config = &*GLOBAL_CONFIG;

        assert!(FieldToMatch::header("User-Agent").validate(config).is_ok());
        assert!(FieldToMatch::new(MatchFieldType::Body).validate(config).is_ok());
        assert_eq!(
            Err(Error::Missing("FieldToMatch.Data")),
            FieldToMatch::new(MatchFieldType::Header).validate(config)
        );
        assert_eq!(
            Err(Error::Missing("FieldToMatch.Type")),
            FieldToMatch::default().validate(config)
        );
    }
}
