//! Samples of the web requests that matched a rule of a web ACL.
//!
//! The service samples among the first 5,000 requests matching within the requested
//! [`TimeWindow`]. When that cap is reached before the end of the window, the response carries
//! the narrower window that was actually sampled, see
//! [`GetSampledRequestsResponse::effective_window`].
use crate::{
    config::Config,
    validator::{check_range, check_required_identifier, required, Error, Validate, MAX_ITEMS},
};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// `RuleId` of the samples that matched none of the rules & got the default action
pub const DEFAULT_ACTION_RULE_ID: &str = "Default_Action";

/// The most requests the service samples from in a single time window
pub const POPULATION_CAP: i64 = 5_000;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpHeader {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl HttpHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

fluent_setters!(HttpHeader {
    with_name => name: String,
    with_value => value: String,
});

/// A sampled web request as the service received it
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpRequest {
    /// The address of the client, or of the CloudFront edge / load balancer in front of it
    #[serde(rename = "ClientIP")]
    pub client_ip: Option<String>,
    /// Two-letter country code
    pub country: Option<String>,
    #[serde(rename = "URI")]
    pub uri: Option<String>,
    pub method: Option<String>,
    #[serde(rename = "HTTPVersion")]
    pub http_version: Option<String>,
    pub headers: Option<Vec<HttpHeader>>,
}

fluent_setters!(HttpRequest {
    with_client_ip => client_ip: String,
    with_country => country: String,
    with_uri => uri: String,
    with_method => method: String,
    with_http_version => http_version: String,
    with_headers => headers: Vec<HttpHeader>,
});

impl HttpRequest {
    /// The value of the first header named `name`, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .flatten()
            .find(|header| {
                header
                    .name
                    .as_deref()
                    .is_some_and(|header_name| header_name.eq_ignore_ascii_case(name))
            })
            .and_then(|header| header.value.as_deref())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SampledHttpRequest {
    pub request: Option<HttpRequest>,
    /// How many requests this sample stands for, relative to the other samples
    pub weight: Option<i64>,
    #[serde(default, with = "crate::util::serde::epoch_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    /// `ALLOW`, `BLOCK` or `COUNT`
    pub action: Option<String>,
    /// The rule of the rule group that matched, when the sampled rule is a group
    pub rule_within_rule_group: Option<String>,
}

fluent_setters!(SampledHttpRequest {
    with_request => request: HttpRequest,
    with_weight => weight: i64,
    with_action => action: String,
    with_rule_within_rule_group => rule_within_rule_group: String,
});

impl SampledHttpRequest {
    /// Truncated to the millisecond precision of the wire format
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp.trunc_subsecs(3));
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeWindow {
    #[serde(default, with = "crate::util::serde::epoch_seconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::util::serde::epoch_seconds_option")]
    pub end_time: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Both ends are truncated to the millisecond precision of the wire format
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self::default()
            .with_start_time(start_time)
            .with_end_time(end_time)
    }

    #[must_use]
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time.trunc_subsecs(3));
        self
    }

    #[must_use]
    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time.trunc_subsecs(3));
        self
    }

    /// The `length` right before `now`
    pub fn last(length: Duration, now: DateTime<Utc>) -> Self {
        Self::new(now - length, now)
    }

    /// `None` unless both ends are set
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Checks that the window is ordered & lies within the `max_age` before `now`
    pub fn validate_at(&self, now: DateTime<Utc>, max_age: Duration) -> Result<(), Error> {
        let start = *required("TimeWindow.StartTime", &self.start_time)?;
        let end = *required("TimeWindow.EndTime", &self.end_time)?;

        if start >= end {
            return Err(Error::InvertedTimeWindow);
        }

        if start < now - max_age {
            return Err(Error::TimeWindowTooOld);
        }

        if end > now {
            return Err(Error::TimeWindowInFuture);
        }

        Ok(())
    }
}

impl Validate for TimeWindow {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        self.validate_at(Utc::now(), config.sampling_window())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSampledRequestsRequest {
    pub web_acl_id: Option<String>,
    /// A rule or rule group of the web ACL, or [`DEFAULT_ACTION_RULE_ID`]
    pub rule_id: Option<String>,
    pub time_window: Option<TimeWindow>,
    /// `1..=500`; fewer samples are returned when fewer requests matched
    pub max_items: Option<i64>,
}

fluent_setters!(GetSampledRequestsRequest {
    with_web_acl_id => web_acl_id: String,
    with_rule_id => rule_id: String,
    with_time_window => time_window: TimeWindow,
    with_max_items => max_items: i64,
});

impl GetSampledRequestsRequest {
    /// Samples the requests that got the default action of the web ACL
    #[must_use]
    pub fn for_default_action(self) -> Self {
        self.with_rule_id(DEFAULT_ACTION_RULE_ID)
    }
}

impl Validate for GetSampledRequestsRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_required_identifier("WebAclId", &self.web_acl_id)?;
        check_required_identifier("RuleId", &self.rule_id)?;
        required("TimeWindow", &self.time_window)?.validate(config)?;

        check_range("MaxItems", *required("MaxItems", &self.max_items)?, MAX_ITEMS)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetSampledRequestsResponse {
    pub sampled_requests: Option<Vec<SampledHttpRequest>>,
    /// The number of requests that matched within the returned `TimeWindow`
    pub population_size: Option<i64>,
    /// The window that was actually sampled, which may end before the requested one
    pub time_window: Option<TimeWindow>,
}

impl GetSampledRequestsResponse {
    /// The window the samples were taken from
    pub fn effective_window<'a>(&'a self, requested: &'a TimeWindow) -> &'a TimeWindow {
        self.time_window.as_ref().unwrap_or(requested)
    }

    /// Whether the service stopped sampling before the end of the `requested` window
    pub fn was_narrowed(&self, requested: &TimeWindow) -> bool {
        self.effective_window(requested) != requested
    }
}

impl_operation!(GetSampledRequestsRequest => GetSampledRequestsResponse, "GetSampledRequests");
