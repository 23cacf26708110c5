//! Logging of the traffic a web ACL inspects to a Kinesis Data Firehose.
use crate::{
    config::Config,
    field_to_match::FieldToMatch,
    validator::{
        check_length, check_marker, check_optional_marker, check_optional_range, required, Error,
        Validate, LIST_LIMIT,
    },
};
use serde::{Deserialize, Serialize};

fn check_arn(field: &'static str, arn: &Option<String>) -> Result<(), Error> {
    check_marker(field, required(field, arn)?)
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfiguration {
    /// The web ACL being logged
    pub resource_arn: Option<String>,
    /// Exactly one Kinesis Data Firehose ARN, whose name starts with `aws-waf-logs-`
    pub log_destination_configs: Option<Vec<String>>,
    /// Parts of the logged requests that are replaced with `xxx`
    pub redacted_fields: Option<Vec<FieldToMatch>>,
}

impl LoggingConfiguration {
    pub fn new(resource_arn: impl Into<String>, firehose_arn: impl Into<String>) -> Self {
        Self {
            resource_arn: Some(resource_arn.into()),
            log_destination_configs: Some(vec![firehose_arn.into()]),
            redacted_fields: None,
        }
    }

    /// Appends a field to leave out of the logs
    #[must_use]
    pub fn redact(mut self, field: FieldToMatch) -> Self {
        self.redacted_fields.get_or_insert_with(Vec::new).push(field);
        self
    }
}

fluent_setters!(LoggingConfiguration {
    with_resource_arn => resource_arn: String,
    with_log_destination_configs => log_destination_configs: Vec<String>,
    with_redacted_fields => redacted_fields: Vec<FieldToMatch>,
});

impl Validate for LoggingConfiguration {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_arn("ResourceArn", &self.resource_arn)?;

        let destinations = required("LogDestinationConfigs", &self.log_destination_configs)?;
        check_length("LogDestinationConfigs", destinations.len(), 1..=1)?;
        destinations
            .iter()
            .try_for_each(|arn| check_marker("LogDestinationConfigs", arn))?;

        self.redacted_fields.validate(config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutLoggingConfigurationRequest {
    pub logging_configuration: Option<LoggingConfiguration>,
}

fluent_setters!(PutLoggingConfigurationRequest {
    with_logging_configuration => logging_configuration: LoggingConfiguration,
});

impl From<LoggingConfiguration> for PutLoggingConfigurationRequest {
    fn from(logging_configuration: LoggingConfiguration) -> Self {
        Self {
            logging_configuration: Some(logging_configuration),
        }
    }
}

impl Validate for PutLoggingConfigurationRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("LoggingConfiguration", &self.logging_configuration)?.validate(config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutLoggingConfigurationResponse {
    pub logging_configuration: Option<LoggingConfiguration>,
}

impl_operation!(
    PutLoggingConfigurationRequest => PutLoggingConfigurationResponse,
    "PutLoggingConfiguration"
);

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetLoggingConfigurationRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(GetLoggingConfigurationRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for GetLoggingConfigurationRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_arn("ResourceArn", &self.resource_arn)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetLoggingConfigurationResponse {
    pub logging_configuration: Option<LoggingConfiguration>,
}

impl_operation!(
    GetLoggingConfigurationRequest => GetLoggingConfigurationResponse,
    "GetLoggingConfiguration"
);

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteLoggingConfigurationRequest {
    pub resource_arn: Option<String>,
}

fluent_setters!(DeleteLoggingConfigurationRequest {
    with_resource_arn => resource_arn: String,
});

impl Validate for DeleteLoggingConfigurationRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_arn("ResourceArn", &self.resource_arn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteLoggingConfigurationResponse {}

impl_operation!(
    DeleteLoggingConfigurationRequest => DeleteLoggingConfigurationResponse,
    "DeleteLoggingConfiguration"
);

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLoggingConfigurationsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListLoggingConfigurationsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListLoggingConfigurationsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLoggingConfigurationsResponse {
    pub logging_configurations: Option<Vec<LoggingConfiguration>>,
    pub next_marker: Option<String>,
}

impl_operation!(
    ListLoggingConfigurationsRequest => ListLoggingConfigurationsResponse,
    "ListLoggingConfigurations"
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::GLOBAL_CONFIG, field_to_match::MatchFieldType};
    use pretty_assertions::assert_eq;
    use serde_json::{json, to_value};

    const WEB_ACL: &str = "arn:aws:waf::123456789012:webacl/3b5d9e8c-8a3f-4d4e-9c6a-7d2f4e1a0b2c";
    const FIREHOSE: &str = "arn:aws:firehose:us-east-1:123456789012:deliverystream/aws-waf-logs-main";

    #[test]
    fn put_logging_configuration() {
        let request = PutLoggingConfigurationRequest::from(
            LoggingConfiguration::new(WEB_ACL, FIREHOSE)
                .redact(FieldToMatch::header("Authorization"))
                .redact(FieldToMatch::new(MatchFieldType::QueryString)),
        );

        assert_eq!(
            json!({
                "LoggingConfiguration": {
                    "ResourceArn": WEB_ACL,
                    "LogDestinationConfigs": [FIREHOSE],
                    "RedactedFields": [
                        { "Type": "HEADER", "Data": "Authorization" },
                        { "Type": "QUERY_STRING" }
                    ]
                }
            }),
            to_value(&request).expect("Should serialize")
        );
        assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
        assert_eq!(
            request,
            PutLoggingConfigurationRequest::default().with_logging_configuration(
                LoggingConfiguration::new(WEB_ACL, FIREHOSE)
                    .redact(FieldToMatch::header("Authorization"))
                    .redact(FieldToMatch::new(MatchFieldType::QueryString))
            )
        );
    }

    #[test]
    fn exactly_one_destination() {
        let config = &*GLOBAL_CONFIG;
        let two = LoggingConfiguration::new(WEB_ACL, FIREHOSE)
            .with_log_destination_configs(vec![FIREHOSE.to_string(), FIREHOSE.to_string()]);
        let none = two.clone().with_log_destination_configs(Vec::<String>::new());

        assert!(two.validate(config).is_err());
        assert!(none.validate(config).is_err());

        let invalid_redaction =
            LoggingConfiguration::new(WEB_ACL, FIREHOSE).redact(FieldToMatch::new(MatchFieldType::Header));
        assert!(invalid_redaction.validate(config).is_err());
    }
}
