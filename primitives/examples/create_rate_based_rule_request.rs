use waf_primitives::{
    config::GLOBAL_CONFIG,
    rate_based_rule::{CreateRateBasedRuleRequest, RateKey, UpdateRateBasedRuleRequest},
    tag::Tag,
    test_util::{CHANGE_TOKEN, IP_PREDICATE, RULE_ID},
    UpdateSetRequest, Validate,
};

fn main() {
    let create = CreateRateBasedRuleRequest::default()
        .with_name("LoginFlood")
        .with_metric_name("LoginFlood")
        .with_rate_key(RateKey::Ip)
        .with_rate_limit(1_000_i64)
        .with_change_token(CHANGE_TOKEN)
        .with_tags(vec![Tag::new("team", "edge")]);

    assert_eq!(Ok(()), create.validate(&GLOBAL_CONFIG));

    let too_low = create.with_rate_limit(99_i64);
    assert!(too_low.validate(&GLOBAL_CONFIG).is_err());

    let update = UpdateRateBasedRuleRequest::default()
        .with_rule_id(RULE_ID)
        .with_change_token(CHANGE_TOKEN)
        .with_rate_limit(2_000_i64)
        .insert(IP_PREDICATE.clone());

    println!(
        "{}",
        serde_json::to_string_pretty(&update).expect("should serialize")
    );
}
