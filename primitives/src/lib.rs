#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
//! Typed request & response shapes of the AWS WAF Classic JSON API,
//! with a client-side validator and the JSON 1.1 protocol envelope.

#[macro_use]
mod macros;

pub mod action;
pub mod activated_rule;
pub mod change_token;
pub mod conditions;
pub mod config;
pub mod error;
pub mod field_to_match;
pub mod logging_configuration;
pub mod operation;
pub mod policy;
pub mod rate_based_rule;
pub mod rule;
pub mod rule_group;
pub mod sampled;
pub mod tag;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
pub mod update;
pub mod util;
pub mod validator;
pub mod web_acl;

pub use self::action::{WafAction, WafActionType, WafOverrideAction, WafOverrideActionType};
pub use self::activated_rule::{ActivatedRule, ExcludedRule, WafRuleType};
pub use self::conditions::{
    byte_match, geo_match, ip_set, regex_match, regex_pattern, size_constraint, sql_injection, xss,
};
pub use self::config::{Config, Scope};
pub use self::error::{ErrorCode, ServiceError};
pub use self::field_to_match::{FieldToMatch, MatchFieldType, TextTransformation};
pub use self::operation::{parse_response, prepare, Operation, PreparedRequest};
pub use self::sampled::{GetSampledRequestsRequest, GetSampledRequestsResponse, TimeWindow};
pub use self::update::{ChangeAction, Update, UpdatePayload, UpdateSetRequest};
pub use self::validator::Validate;
