//! IAM policies sharing a rule group with other accounts.
use crate::{
    config::Config,
    validator::{check_length, check_marker, required, Error, Validate},
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const POLICY_LENGTH: RangeInclusive<usize> = 1..=395_000;

fn check_rule_group_arn(arn: &Option<String>) -> Result<(), Error> {
    check_marker("ResourceArn", required("ResourceArn", arn)?)
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutPermissionPolicyRequest {
    /// The rule group the policy is attached to
    pub resource_arn: Option<String>,
    /// An IAM policy document, as JSON text
    pub policy: Option<String>,
}

fluent_setters!(PutPermissionPolicyRequest {
    with_resource_arn => resource_arn: String,
    with_policy => policy: String,
});

impl Validate for PutPermissionPolicyRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_rule_group_arn(&self.resource_arn)?;
        let policy = required("Policy", &self.policy)?;

        check_length("Policy", policy.chars().count(), POLICY_LENGTH)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PutPermissionPolicyResponse {}

impl_operation!(PutPermissionPolicyRequest => PutPermissionPolicyResponse, "PutPermissionPolicy");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPermissionPolicyRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(GetPermissionPolicyRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for GetPermissionPolicyRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_rule_group_arn(&self.resource_arn)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetPermissionPolicyResponse {
    pub policy: Option<String>,
}

impl_operation!(GetPermissionPolicyRequest => GetPermissionPolicyResponse, "GetPermissionPolicy");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeletePermissionPolicyRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(DeletePermissionPolicyRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for DeletePermissionPolicyRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_rule_group_arn(&self.resource_arn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeletePermissionPolicyResponse {}

impl_operation!(
    DeletePermissionPolicyRequest => DeletePermissionPolicyResponse,
    "DeletePermissionPolicy"
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GLOBAL_CONFIG;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ARN: &str = "arn:aws:waf::123456789012:rulegroup/12345cb-2e36-4d27-b2ce-b01fdf5e8b2a";

    #[test]
    fn put_policy() {
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": { "AWS": "arn:aws:iam::111111111111:user/MyUserName" },
                "Action": ["waf:UpdateWebACL", "waf:GetRuleGroup"],
                "Resource": ARN
            }]
        });
        let request = PutPermissionPolicyRequest::default()
            .with_resource_arn(ARN)
            .with_policy(policy.to_string());

        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
        assert_eq!(
            json!({ "ResourceArn": ARN, "Policy": policy.to_string() }),
            serde_json::to_value(&request).expect("Should serialize")
        );
        assert_eq!(
            Err(Error::Missing("Policy")),
            PutPermissionPolicyRequest::default()
                .with_resource_arn(ARN)
                .validate(&GLOBAL_CONFIG)
        );
    }

    #[test]
    fn arn_is_required() {
        assert_eq!(
            Err(Error::Missing("ResourceArn")),
            DeletePermissionPolicyRequest::default().validate(&GLOBAL_CONFIG)
        );
        assert_eq!(
            Ok(()),
            GetPermissionPolicyRequest::default()
                .with_resource_arn(ARN)
                .validate(&GLOBAL_CONFIG)
        );
    }
}
