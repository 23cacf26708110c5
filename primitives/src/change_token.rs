//! Change tokens: the optimistic concurrency control of every create, update & delete action.
//!
//! Get a token, pass it to exactly one mutating action & poll its status until the change is
//! propagated. A second mutating action with the same token is rejected by the service.
use crate::{
    config::Config,
    validator::{check_required_identifier, Error, Validate},
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum ChangeTokenStatus {
    /// Issued, but not used in a mutating action yet
    Provisioned,
    /// Used, the change is propagating
    Pending,
    /// Propagated to every server
    Insync,
}

impl ChangeTokenStatus {
    pub fn is_propagated(&self) -> bool {
        matches!(self, Self::Insync)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GetChangeTokenRequest {}

impl Validate for GetChangeTokenRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        Ok(())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetChangeTokenResponse {
    pub change_token: Option<String>,
}

impl_operation!(GetChangeTokenRequest => GetChangeTokenResponse, "GetChangeToken");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetChangeTokenStatusRequest {
    pub change_token: Option<String>,
}

impl GetChangeTokenStatusRequest {
    pub fn new(change_token: impl Into<String>) -> Self {
        Self {
            change_token: Some(change_token.into()),
        }
    }
}

fluent_setters!(GetChangeTokenStatusRequest {
    with_change_token => change_token: String,
});

impl Validate for GetChangeTokenStatusRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetChangeTokenStatusResponse {
    pub change_token_status: Option<ChangeTokenStatus>,
}

impl_operation!(GetChangeTokenStatusRequest => GetChangeTokenStatusResponse, "GetChangeTokenStatus");
