use pretty_assertions::assert_eq;
use serde_json::{from_value, json, to_value};
use waf_primitives::{
    config::{DuplicatePolicy, GLOBAL_CONFIG},
    geo_match::{CountryCode, GeoMatchConstraint, UpdateGeoMatchSetRequest},
    ip_set::{IpSetDescriptor, IpSetDescriptorType, IpSetUpdate, UpdateIpSetRequest},
    validator::Error,
    ChangeAction, Update, UpdateSetRequest, Validate,
};

fn v4(cidr: &str) -> IpSetDescriptor {
    IpSetDescriptor::new(IpSetDescriptorType::Ipv4, cidr)
}

fn request() -> UpdateIpSetRequest {
    UpdateIpSetRequest::default()
        .with_ip_set_id("example1ds3t-46da-4fdb-b8d5-abc321j569j5")
        .with_change_token("abcd12f2-46da-4fdb-b8d5-fbd4c466928f")
}

#[test]
fn updates_keep_the_order_of_the_calls() {
    let request = request()
        .insert(v4("192.0.2.0/24"))
        .delete(v4("192.0.2.44/32"))
        .replace(v4("198.51.100.0/24"), v4("198.51.100.0/25"))
        .insert(v4("203.0.113.0/24"));

    let actions: Vec<_> = request
        .updates()
        .unwrap_or_default()
        .iter()
        .map(|update| (update.action, update.payload.clone().and_then(|d| d.value)))
        .collect();

    assert_eq!(
        vec![
            (Some(ChangeAction::Insert), Some("192.0.2.0/24".to_string())),
            (Some(ChangeAction::Delete), Some("192.0.2.44/32".to_string())),
            (Some(ChangeAction::Delete), Some("198.51.100.0/24".to_string())),
            (Some(ChangeAction::Insert), Some("198.51.100.0/25".to_string())),
            (Some(ChangeAction::Insert), Some("203.0.113.0/24".to_string())),
        ],
        actions
    );

    // the order survives the wire
    let round_trip: UpdateIpSetRequest =
        from_value(to_value(&request).expect("Should serialize")).expect("Should deserialize");
    assert_eq!(request, round_trip);
}

#[test]
fn sequential_assignment_equals_the_fluent_chain() {
    let mut assigned = UpdateIpSetRequest::default();
    assigned.ip_set_id = Some("example1ds3t-46da-4fdb-b8d5-abc321j569j5".into());
    assigned.change_token = Some("abcd12f2-46da-4fdb-b8d5-fbd4c466928f".into());
    assigned.updates = Some(vec![IpSetUpdate::insert(v4("192.0.2.44/32"))]);

    assert_eq!(assigned, request().insert(v4("192.0.2.44/32")));
    assert_eq!(UpdateIpSetRequest::default(), from_value(json!({})).unwrap());
}

#[test]
fn unknown_actions_and_repeated_members_are_rejected() {
    let unknown = json!({
        "IPSetId": "set",
        "ChangeToken": "token",
        "Updates": [{
            "Action": "MODIFY",
            "IPSetDescriptor": { "Type": "IPV4", "Value": "192.0.2.44/32" }
        }]
    });
    assert!(from_value::<UpdateIpSetRequest>(unknown).is_err());

    let repeated = r#"{"Action":"INSERT","Action":"DELETE","IPSetDescriptor":{"Type":"IPV4","Value":"192.0.2.44/32"}}"#;
    assert!(serde_json::from_str::<IpSetUpdate>(repeated).is_err());

    let lowercase = json!({ "Action": "insert" });
    assert!(from_value::<IpSetUpdate>(lowercase).is_err());
}

#[test]
fn duplicates_and_invalid_entries() {
    let config = &*GLOBAL_CONFIG;
    let mut strict = GLOBAL_CONFIG.clone();
    strict.duplicate_updates = DuplicatePolicy::Reject;

    let repeated = request()
        .insert(v4("192.0.2.44/32"))
        .insert(v4("192.0.2.44/32"));
    assert_eq!(Ok(()), repeated.validate(config));
    assert_eq!(Err(Error::DuplicateUpdate(1)), repeated.validate(&strict));

    // DELETE then INSERT of the same value are different entries
    let moved = request()
        .delete(v4("192.0.2.44/32"))
        .insert(v4("192.0.2.44/32"));
    assert_eq!(Ok(()), moved.validate(&strict));

    let wrong_prefix = request().insert(v4("192.0.2.0/12"));
    assert_eq!(
        Err(Error::InvalidCidr("192.0.2.0/12".into())),
        wrong_prefix.validate(config)
    );
}

#[test]
fn geo_match_batch() {
    let us: CountryCode = "US".parse().expect("Valid country code");
    let request = UpdateGeoMatchSetRequest::default()
        .with_geo_match_set_id("example1ds3t-46da-4fdb-b8d5-abc321j569j5")
        .with_change_token("abcd12f2-46da-4fdb-b8d5-fbd4c466928f")
        .delete(GeoMatchConstraint::country(us));

    assert_eq!(
        json!([{ "Action": "DELETE", "GeoMatchConstraint": { "Type": "Country", "Value": "US" } }]),
        to_value(&request).expect("Should serialize")["Updates"]
    );
    assert_eq!(Ok(()), request.validate(&GLOBAL_CONFIG));
    assert_eq!(
        Some(&[Update::delete(GeoMatchConstraint::country("US".parse().unwrap()))][..]),
        request.updates()
    );
}
