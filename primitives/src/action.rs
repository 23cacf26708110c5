use crate::{
    config::Config,
    validator::{required, Error, Validate},
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// What the service does with a request that matches a Rule,
/// or with one that matches none of them (`DefaultAction`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum WafActionType {
    /// CloudFront responds with an HTTP 403 (Forbidden) status code
    Block,
    /// CloudFront responds with the requested object
    Allow,
    /// Increments a counter & continues inspecting the request with the remaining rules
    Count,
}

/// Applies only to an ActivatedRule of type `GROUP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum WafOverrideActionType {
    /// The rule group blocks a request if any of its rules blocks it
    None,
    /// Every rule of the group only counts matching requests
    Count,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WafAction {
    #[serde(rename = "Type")]
    pub action_type: Option<WafActionType>,
}

impl WafAction {
    pub fn new(action_type: WafActionType) -> Self {
        Self {
            action_type: Some(action_type),
        }
    }
}

impl From<WafActionType> for WafAction {
    fn from(action_type: WafActionType) -> Self {
        Self::new(action_type)
    }
}

fluent_setters!(WafAction {
    with_type => action_type: WafActionType,
});

impl Validate for WafAction {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        required("WafAction.Type", &self.action_type).map(|_| ())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WafOverrideAction {
    #[serde(rename = "Type")]
    pub action_type: Option<WafOverrideActionType>,
}

impl WafOverrideAction {
    pub fn new(action_type: WafOverrideActionType) -> Self {
        Self {
            action_type: Some(action_type),
        }
    }
}

impl From<WafOverrideActionType> for WafOverrideAction {
    fn from(action_type: WafOverrideActionType) -> Self {
        Self::new(action_type)
    }
}

fluent_setters!(WafOverrideAction {
    with_type => action_type: WafOverrideActionType,
});

impl Validate for WafOverrideAction {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        required("WafOverrideAction.Type", &self.action_type).map(|_| ())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn action_tokens() {
        assert_eq!(json!({ "Type": "BLOCK" }), to_value(WafAction::new(WafActionType::Block)).unwrap());
        assert_eq!("COUNT", WafOverrideActionType::Count.to_string());
        assert_eq!(Some(WafActionType::Allow), "ALLOW".parse::<WafActionType>().ok());
        assert!("Allow".parse::<WafActionType>().is_err());
        assert!(serde_json::from_value::<WafAction>(json!({ "Type": "DROP" })).is_err());
    }

    #[test]
    fn absent_type_is_omitted() {
        assert_eq!(json!({}), to_value(WafOverrideAction::default()).unwrap());
    }
}
