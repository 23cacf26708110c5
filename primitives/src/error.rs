//! Errors returned by the service, as opposed to the [`validator::Error`]s caught before sending.
//!
//! [`validator::Error`]: crate::validator::Error
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The exceptions of the WAF Classic API, e.g. `WAFStaleDataException`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromStr)]
#[display("WAF{}Exception")]
pub enum ErrorCode {
    BadRequest,
    DisallowedName,
    EntityMigration,
    InternalError,
    InvalidAccount,
    InvalidOperation,
    InvalidParameter,
    InvalidPermissionPolicy,
    InvalidRegexPattern,
    LimitsExceeded,
    NonEmptyEntity,
    NonexistentContainer,
    NonexistentItem,
    ReferencedItem,
    ServiceLinkedRoleError,
    /// The change token was already used or another change is in progress
    StaleData,
    SubscriptionNotFound,
    TagOperation,
    TagOperationInternalError,
    /// Regional only, the resource to associate isn't available yet
    UnavailableEntity,
}

impl ErrorCode {
    /// Whether sending the request again may succeed.
    /// A [`ErrorCode::StaleData`] retry needs a fresh change token.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InternalError
                | Self::StaleData
                | Self::TagOperationInternalError
                | Self::UnavailableEntity
        )
    }
}

/// The JSON body of a failed request
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error(
    "{}: {}",
    self.error_type.as_deref().unwrap_or("UnknownError"),
    self.message.as_deref().unwrap_or_default()
)]
pub struct ServiceError {
    /// Either the bare exception name or `<namespace>#<exception name>`
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ServiceError {
    /// `None` for exceptions outside of the WAF API, e.g. `ThrottlingException`
    pub fn code(&self) -> Option<ErrorCode> {
        let error_type = self.error_type.as_deref()?;
        let name = error_type
            .rsplit_once('#')
            .map_or(error_type, |(_namespace, name)| name);

        name.parse().ok()
    }

    pub fn is_retryable(&self) -> bool {
        self.code().is_some_and(|code| code.is_retryable())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{from_value, json};

    #[test]
    fn error_codes() {
        assert_eq!("WAFStaleDataException", ErrorCode::StaleData.to_string());
        assert_eq!(
            Some(ErrorCode::NonexistentItem),
            "WAFNonexistentItemException".parse().ok()
        );
        assert_eq!(None, "NonexistentItem".parse::<ErrorCode>().ok());
    }

    #[test]
    fn decodes_the_error_body() {
        let error: ServiceError = from_value(json!({
            "__type": "com.amazonaws.waf#WAFStaleDataException",
            "message": "The input token is no longer current."
        }))
        .expect("Should deserialize");

        assert_eq!(Some(ErrorCode::StaleData), error.code());
        assert!(error.is_retryable());
        assert_eq!(
            "com.amazonaws.waf#WAFStaleDataException: The input token is no longer current.",
            error.to_string()
        );

        let bare: ServiceError = from_value(json!({
            "__type": "WAFReferencedItemException",
            "Message": "The rule is still used by a web ACL"
        }))
        .expect("Should deserialize");
        assert_eq!(Some(ErrorCode::ReferencedItem), bare.code());
        assert!(!bare.is_retryable());

        let foreign: ServiceError =
            from_value(json!({ "__type": "ThrottlingException" })).expect("Should deserialize");
        assert_eq!(None, foreign.code());
        assert_eq!("ThrottlingException: ", foreign.to_string());
    }
}
