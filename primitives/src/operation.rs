//! Binding of request shapes to API actions & the JSON 1.1 protocol envelope.
//!
//! Every action is a `POST /` with the action name in the `X-Amz-Target` header
//! and the request shape as the JSON body. Sending, signing & retrying the request
//! is left to the caller.
use crate::{
    config::{Config, Scope},
    error::ServiceError,
    validator::{self, Validate},
};
use serde::{de::DeserializeOwned, Serialize};
use slog::{debug, warn, Logger};
use thiserror::Error;
use url::Url;

pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
pub const TARGET_HEADER: &str = "X-Amz-Target";

/// A request shape of an API action.
pub trait Operation: Serialize + Validate {
    /// The action name, e.g. `UpdateWebACL`
    const NAME: &'static str;
    /// Available only through the regional endpoint
    const REGIONAL_ONLY: bool = false;

    type Response: DeserializeOwned;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation: {0}")]
    Validation(#[from] validator::Error),
    #[error("`{0}` is available only for the regional scope")]
    RegionalOnly(&'static str),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The service rejected the request
    #[error("Service: {0}")]
    Service(#[from] ServiceError),
}

/// A request ready to be signed & sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub endpoint: Url,
    /// `<target prefix>.<action name>`
    pub target: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl PreparedRequest {
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (TARGET_HEADER, self.target.as_str()),
            ("Content-Type", self.content_type),
        ]
    }
}

/// Builds the request for `O` after running the validator, when the [`Config`] enables it.
pub fn prepare<O: Operation>(
    request: &O,
    config: &Config,
    logger: &Logger,
) -> Result<PreparedRequest, Error> {
    if O::REGIONAL_ONLY && config.scope != Scope::Regional {
        warn!(logger, "Regional action requested for the {:?} scope", config.scope; "action" => O::NAME);

        return Err(Error::RegionalOnly(O::NAME));
    }

    if config.validate_requests {
        if let Err(error) = request.validate(config) {
            warn!(logger, "Invalid request: {}", &error; "action" => O::NAME);

            return Err(error.into());
        }
    }

    let body = serde_json::to_vec(request)?;
    let target = config.target(O::NAME);
    debug!(logger, "Prepared request"; "target" => &target, "bytes" => body.len());

    Ok(PreparedRequest {
        endpoint: config.endpoint.clone(),
        target,
        content_type: CONTENT_TYPE,
        body,
    })
}

/// Decodes the response body of `O`.
///
/// Any status outside of `2xx` is decoded as a [`ServiceError`] instead.
pub fn parse_response<O: Operation>(status: u16, body: &[u8]) -> Result<O::Response, Error> {
    if (200..300).contains(&status) {
        Ok(serde_json::from_slice(body)?)
    } else {
        Err(serde_json::from_slice::<ServiceError>(body)?.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        change_token::{GetChangeTokenRequest, GetChangeTokenResponse},
        config::{GLOBAL_CONFIG, REGIONAL_CONFIG},
        error::ErrorCode,
        ip_set::{GetIpSetRequest, GetIpSetResponse},
        test_util::{CHANGE_TOKEN, WEB_ACL_ID},
        util::logging::discard_logger,
        web_acl::{AssociateWebAclRequest, GetWebAclRequest},
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn prepares_target_and_body() {
        let logger = discard_logger();
        let request = GetWebAclRequest::default().with_web_acl_id(WEB_ACL_ID);

        let prepared = prepare(&request, &GLOBAL_CONFIG, &logger).expect("Should prepare");

        assert_eq!("AWSWAF_20150824.GetWebACL", prepared.target);
        assert_eq!(CONTENT_TYPE, prepared.content_type);
        assert_eq!("https://waf.amazonaws.com/", prepared.endpoint.as_str());
        assert_eq!(
            json!({ "WebACLId": WEB_ACL_ID }),
            serde_json::from_slice::<serde_json::Value>(&prepared.body).unwrap()
        );
        assert_eq!(
            [
                ("X-Amz-Target", "AWSWAF_20150824.GetWebACL"),
                ("Content-Type", "application/x-amz-json-1.1"),
            ],
            prepared.headers()
        );

        let regional = prepare(&request, &REGIONAL_CONFIG, &logger).expect("Should prepare");
        assert_eq!("AWSWAF_Regional_20161128.GetWebACL", regional.target);
    }

    #[test]
    fn validation_follows_the_config() {
        let logger = discard_logger();
        let invalid = GetWebAclRequest::default();

        assert!(matches!(
            prepare(&invalid, &GLOBAL_CONFIG, &logger),
            Err(Error::Validation(validator::Error::Missing("WebACLId")))
        ));

        let mut unchecked = GLOBAL_CONFIG.clone();
        unchecked.validate_requests = false;
        let prepared = prepare(&invalid, &unchecked, &logger).expect("Should prepare");
        assert_eq!(b"{}".to_vec(), prepared.body);
    }

    #[test]
    fn regional_only_actions_need_the_regional_scope() {
        let logger = discard_logger();
        let request = AssociateWebAclRequest::default()
            .with_web_acl_id("webacl-1472061481310")
            .with_resource_arn(
                "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/my-alb/50dc6c495c0c9188",
            );

        assert!(matches!(
            prepare(&request, &GLOBAL_CONFIG, &logger),
            Err(Error::RegionalOnly("AssociateWebACL"))
        ));
        assert_eq!(
            "AWSWAF_Regional_20161128.AssociateWebACL",
            prepare(&request, &REGIONAL_CONFIG, &logger)
                .expect("Should prepare")
                .target
        );
    }

    #[test]
    fn parses_responses_and_service_errors() {
        let response = parse_response::<GetChangeTokenRequest>(
            200,
            br#"{"ChangeToken":"abcd12f2-46da-4fdb-b8d5-fbd4c466928f"}"#,
        )
        .expect("Should parse");
        assert_eq!(
            GetChangeTokenResponse {
                change_token: Some(CHANGE_TOKEN.into()),
            },
            response
        );

        let rejected = parse_response::<GetIpSetRequest>(
            400,
            br#"{"__type":"WAFNonexistentItemException","message":"The referenced item does not exist."}"#,
        );
        match rejected {
            Err(Error::Service(error)) => {
                assert_eq!(Some(ErrorCode::NonexistentItem), error.code())
            }
            other => panic!("Expected a service error, got {:?}", other),
        }

        let malformed: Result<GetIpSetResponse, _> =
            parse_response::<GetIpSetRequest>(200, b"not json");
        assert!(matches!(malformed, Err(Error::Json(_))));
    }
}
