//! Client-side pre-checks of the documented API constraints.
//!
//! The service enforces all of these on its own, running them locally only
//! separates a malformed request from one rejected by the service.
//! Nothing here coerces a value, an out-of-range value is always an [`Error`].
use crate::config::Config;
use std::{collections::HashSet, hash::Hash, ops::RangeInclusive};
use thiserror::Error;

/// Identifiers, names & change tokens
pub const IDENTIFIER_LENGTH: RangeInclusive<usize> = 1..=128;
/// `NextMarker` & ARNs
pub const MARKER_LENGTH: RangeInclusive<usize> = 1..=1224;
pub const RATE_LIMIT: RangeInclusive<i64> = 100..=2_000_000_000;
pub const SIZE: RangeInclusive<i64> = 0..=21_474_836_480;
pub const MAX_ITEMS: RangeInclusive<i64> = 1..=500;
/// `Limit` of the `List*` actions
pub const LIST_LIMIT: RangeInclusive<i64> = 0..=100;
/// `ByteMatchTuple.TargetString`, in bytes
pub const TARGET_STRING_LENGTH: RangeInclusive<usize> = 1..=50;
pub const REGEX_PATTERN_LENGTH: RangeInclusive<usize> = 1..=512;
pub const TAG_KEY_LENGTH: RangeInclusive<usize> = 1..=128;
pub const TAG_VALUE_LENGTH: RangeInclusive<usize> = 0..=256;
/// Metric names reserved by the service
pub const RESERVED_METRIC_NAMES: [&str; 2] = ["All", "Default_Action"];

pub trait Validate {
    fn validate(&self, config: &Config) -> Result<(), Error>;
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("`{0}` is required")]
    Missing(&'static str),
    #[error("`{field}` has length {length}, expected {min}..={max}")]
    Length {
        field: &'static str,
        length: usize,
        min: usize,
        max: usize,
    },
    #[error("`{0}` should contain at least one non-whitespace character")]
    Blank(&'static str),
    #[error("`{field}` is {value}, expected {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("`{0}` can contain only alphanumeric characters")]
    InvalidMetricName(String),
    #[error("`{0}` is a metric name reserved by the service")]
    ReservedMetricName(String),
    #[error("`{0}` is not a valid CIDR block for the descriptor type")]
    InvalidCidr(String),
    #[error("`Action` and `OverrideAction` can not be both set on an ActivatedRule")]
    ActionWithOverrideAction,
    #[error("`OverrideAction` applies only to ActivatedRules of type GROUP")]
    OverrideActionOutsideGroup,
    #[error("`ExcludedRules` apply only to ActivatedRules of type GROUP")]
    ExcludedRulesOutsideGroup,
    #[error("Priority {0} is used by more than one ActivatedRule")]
    DuplicatePriority(i32),
    #[error("`TextTransformation` has to be NONE when the size of the BODY is measured")]
    TransformedBody,
    #[error("`Updates` should contain at least one entry")]
    EmptyUpdates,
    #[error("`{0}` should contain at least one entry")]
    EmptyList(&'static str),
    #[error("Update at index {0} repeats an earlier entry of the same batch")]
    DuplicateUpdate(usize),
    #[error("`StartTime` should be before `EndTime`")]
    InvertedTimeWindow,
    #[error("`StartTime` should be within the sampling window")]
    TimeWindowTooOld,
    #[error("`EndTime` can not be in the future")]
    TimeWindowInFuture,
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        match self {
            Some(value) => value.validate(config),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        self.iter().try_for_each(|value| value.validate(config))
    }
}

/// Returns the value of a required member or [`Error::Missing`].
pub fn required<'a, T>(field: &'static str, value: &'a Option<T>) -> Result<&'a T, Error> {
    value.as_ref().ok_or(Error::Missing(field))
}

pub fn check_length(
    field: &'static str,
    length: usize,
    allowed: RangeInclusive<usize>,
) -> Result<(), Error> {
    if allowed.contains(&length) {
        Ok(())
    } else {
        Err(Error::Length {
            field,
            length,
            min: *allowed.start(),
            max: *allowed.end(),
        })
    }
}

pub fn check_range(field: &'static str, value: i64, allowed: RangeInclusive<i64>) -> Result<(), Error> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field,
            value,
            min: *allowed.start(),
            max: *allowed.end(),
        })
    }
}

/// Length in `1..=128` characters matching `.*\S.*`
pub fn check_identifier(field: &'static str, value: &str) -> Result<(), Error> {
    check_non_blank(field, value, IDENTIFIER_LENGTH)
}

/// Length in `1..=1224` characters matching `.*\S.*`
pub fn check_marker(field: &'static str, value: &str) -> Result<(), Error> {
    check_non_blank(field, value, MARKER_LENGTH)
}

fn check_non_blank(
    field: &'static str,
    value: &str,
    allowed: RangeInclusive<usize>,
) -> Result<(), Error> {
    check_length(field, value.chars().count(), allowed)?;

    if value.chars().all(char::is_whitespace) {
        return Err(Error::Blank(field));
    }

    Ok(())
}

/// A required member with the [`check_identifier`] constraints
pub fn check_required_identifier(field: &'static str, value: &Option<String>) -> Result<(), Error> {
    check_identifier(field, required(field, value)?)
}

pub fn check_optional_identifier(field: &'static str, value: &Option<String>) -> Result<(), Error> {
    match value {
        Some(value) => check_identifier(field, value),
        None => Ok(()),
    }
}

pub fn check_optional_marker(field: &'static str, value: &Option<String>) -> Result<(), Error> {
    match value {
        Some(value) => check_marker(field, value),
        None => Ok(()),
    }
}

pub fn check_optional_range(
    field: &'static str,
    value: Option<i64>,
    allowed: RangeInclusive<i64>,
) -> Result<(), Error> {
    match value {
        Some(value) => check_range(field, value, allowed),
        None => Ok(()),
    }
}

/// Alphanumeric, `1..=128` characters & not one of the [`RESERVED_METRIC_NAMES`]
pub fn check_metric_name(field: &'static str, value: &str) -> Result<(), Error> {
    check_length(field, value.chars().count(), IDENTIFIER_LENGTH)?;

    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidMetricName(value.to_string()));
    }

    if RESERVED_METRIC_NAMES.contains(&value) {
        return Err(Error::ReservedMetricName(value.to_string()));
    }

    Ok(())
}

/// Finds the first entry equal to an earlier one and fails according to the configured policy.
pub fn check_duplicates<T: Eq + Hash>(entries: &[T], config: &Config) -> Result<(), Error> {
    use crate::config::DuplicatePolicy;

    if config.duplicate_updates == DuplicatePolicy::Allow {
        return Ok(());
    }

    let mut seen = HashSet::with_capacity(entries.len());
    match entries.iter().position(|entry| !seen.insert(entry)) {
        Some(index) => Err(Error::DuplicateUpdate(index)),
        None => Ok(()),
    }
}
