//! Condition sets: the match criteria [`Predicate`](crate::rule::Predicate)s of a rule point to.
//!
//! Every set shares the same lifecycle: `Create*` with a name, then fill or drain it with
//! `Update*` batches of [`Update`](crate::update::Update)s, `Get*`, `List*s` & `Delete*`.
pub mod byte_match;
pub mod geo_match;
pub mod ip_set;
pub mod regex_match;
pub mod regex_pattern;
pub mod size_constraint;
pub mod sql_injection;
pub mod xss;
