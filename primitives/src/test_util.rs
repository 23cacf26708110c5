//! Fixtures shared by the tests & examples, modelled on the API reference examples.
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::{
    action::{WafActionType, WafOverrideActionType},
    activated_rule::ActivatedRule,
    byte_match::{ByteMatchTuple, PositionalConstraint},
    field_to_match::{FieldToMatch, TextTransformation},
    ip_set::{IpSetDescriptor, IpSetDescriptorType},
    rule::{Predicate, PredicateType},
    sampled::TimeWindow,
};

pub const CHANGE_TOKEN: &str = "abcd12f2-46da-4fdb-b8d5-fbd4c466928f";
pub const IP_SET_ID: &str = "example1ds3t-46da-4fdb-b8d5-abc321j569j5";
pub const BYTE_MATCH_SET_ID: &str = "exampleIDs3t-46da-4fdb-b8d5-abc321j569j5";
pub const WEB_ACL_ID: &str = "createwebacl-1472061481310";
pub const RULE_ID: &str = "WAFRule-1-Example";
pub const RULE_GROUP_ID: &str = "12345cb-2e36-4d27-b2ce-b01fdf5e8b2a";
pub const EXCLUDED_RULE_ID: &str = "5432cb-2e36-4d27-b2ce-b01fdf5e8b2a";

/// `2016-09-16T22:00:00Z`
pub static SAMPLE_START: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.timestamp_opt(1_474_063_200, 0)
        .single()
        .expect("Valid timestamp")
});

/// `2016-09-17T01:00:00Z`, three hours after [`SAMPLE_START`]
pub static SAMPLE_END: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.timestamp_opt(1_474_074_000, 0)
        .single()
        .expect("Valid timestamp")
});

pub static SAMPLE_WINDOW: Lazy<TimeWindow> =
    Lazy::new(|| TimeWindow::new(*SAMPLE_START, *SAMPLE_END));

pub static DESCRIPTOR_V4: Lazy<IpSetDescriptor> =
    Lazy::new(|| IpSetDescriptor::new(IpSetDescriptorType::Ipv4, "192.0.2.44/32"));

pub static DESCRIPTOR_V6: Lazy<IpSetDescriptor> = Lazy::new(|| {
    IpSetDescriptor::new(
        IpSetDescriptorType::Ipv6,
        "1111:0000:0000:0000:0000:0000:0000:0111/128",
    )
});

/// `User-Agent` header containing `BadBot`
pub static BAD_BOT_TUPLE: Lazy<ByteMatchTuple> = Lazy::new(|| {
    ByteMatchTuple::new(
        FieldToMatch::header("User-Agent"),
        b"BadBot".to_vec(),
        TextTransformation::None,
        PositionalConstraint::Contains,
    )
});

pub static IP_PREDICATE: Lazy<Predicate> =
    Lazy::new(|| Predicate::new(PredicateType::IpMatch, IP_SET_ID));

pub static BLOCKING_RULE: Lazy<ActivatedRule> =
    Lazy::new(|| ActivatedRule::rule(1, RULE_ID, WafActionType::Block));

/// A rule group keeping the actions of its rules, except for [`EXCLUDED_RULE_ID`]
pub static GROUP_RULE: Lazy<ActivatedRule> = Lazy::new(|| {
    ActivatedRule::group(2, RULE_GROUP_ID, WafOverrideActionType::None).exclude(EXCLUDED_RULE_ID)
});
