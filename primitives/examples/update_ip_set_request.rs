use waf_primitives::{
    config::GLOBAL_CONFIG,
    ip_set::{IpSetDescriptor, IpSetDescriptorType, UpdateIpSetRequest},
    prepare,
    util::logging::new_logger,
    UpdateSetRequest,
};

fn main() {
    let logger = new_logger("update_ip_set_request");

    let request = UpdateIpSetRequest::default()
        .with_ip_set_id("example1ds3t-46da-4fdb-b8d5-abc321j569j5")
        .with_change_token("abcd12f2-46da-4fdb-b8d5-fbd4c466928f")
        .delete(IpSetDescriptor::new(IpSetDescriptorType::Ipv4, "192.0.2.44/32"))
        .insert(IpSetDescriptor::new(IpSetDescriptorType::Ipv4, "192.0.2.0/24"));

    let prepared = prepare(&request, &GLOBAL_CONFIG, &logger).expect("should prepare");

    assert_eq!("AWSWAF_20150824.UpdateIPSet", prepared.target);
    println!("{}", String::from_utf8_lossy(&prepared.body));
}
