//! IP match conditions: the IPv4 / IPv6 CIDR blocks a web request originates from.
use crate::{
    config::Config,
    update::{validate_update_set, Update, UpdatePayload},
    validator::{
        check_optional_marker, check_optional_range, check_required_identifier, required, Error,
        Validate, LIST_LIMIT,
    },
};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
pub enum IpSetDescriptorType {
    #[serde(rename = "IPV4")]
    #[display("IPV4")]
    Ipv4,
    #[serde(rename = "IPV6")]
    #[display("IPV6")]
    Ipv6,
}

impl IpSetDescriptorType {
    /// IPv4: `/8` and any range from `/16` through `/32`.
    /// IPv6: `/24`, `/32`, `/48`, `/56`, `/64` and `/128`.
    pub fn supports_prefix(&self, prefix: u8) -> bool {
        match self {
            Self::Ipv4 => prefix == 8 || (16..=32).contains(&prefix),
            Self::Ipv6 => matches!(prefix, 24 | 32 | 48 | 56 | 64 | 128),
        }
    }

    fn is_valid_cidr(&self, cidr: &str) -> bool {
        let (address, prefix) = match cidr.split_once('/') {
            Some(parts) => parts,
            None => return false,
        };

        let prefix = match prefix.parse::<u8>() {
            Ok(prefix) => prefix,
            Err(_) => return false,
        };

        let address_matches = match self {
            Self::Ipv4 => address.parse::<Ipv4Addr>().is_ok(),
            Self::Ipv6 => address.parse::<Ipv6Addr>().is_ok(),
        };

        address_matches && self.supports_prefix(prefix)
    }
}

/// A single CIDR block, e.g. `192.0.2.0/24` or `1111:0000:0000:0000:0000:0000:0000:0111/128`
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetDescriptor {
    #[serde(rename = "Type")]
    pub descriptor_type: Option<IpSetDescriptorType>,
    pub value: Option<String>,
}

impl IpSetDescriptor {
    pub fn new(descriptor_type: IpSetDescriptorType, value: impl Into<String>) -> Self {
        Self {
            descriptor_type: Some(descriptor_type),
            value: Some(value.into()),
        }
    }
}

fluent_setters!(IpSetDescriptor {
    with_type => descriptor_type: IpSetDescriptorType,
    with_value => value: String,
});

impl UpdatePayload for IpSetDescriptor {
    const FIELD: &'static str = "IPSetDescriptor";
}

impl Validate for IpSetDescriptor {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        let descriptor_type = required("IPSetDescriptor.Type", &self.descriptor_type)?;
        let value = required("IPSetDescriptor.Value", &self.value)?;

        if descriptor_type.is_valid_cidr(value) {
            Ok(())
        } else {
            Err(Error::InvalidCidr(value.clone()))
        }
    }
}

/// The IP address blocks a request can originate from, at most 10 000 per set
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpSet {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "IPSetDescriptors")]
    pub ip_set_descriptors: Option<Vec<IpSetDescriptor>>,
}

fluent_setters!(IpSet {
    with_id => ip_set_id: String,
    with_name => name: String,
    with_ip_set_descriptors => ip_set_descriptors: Vec<IpSetDescriptor>,
});

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetSummary {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: Option<String>,
    pub name: Option<String>,
}

fluent_setters!(IpSetSummary {
    with_ip_set_id => ip_set_id: String,
    with_name => name: String,
});

pub type IpSetUpdate = Update<IpSetDescriptor>;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateIpSetRequest {
    pub name: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(CreateIpSetRequest {
    with_name => name: String,
    with_change_token => change_token: String,
});

impl Validate for CreateIpSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("Name", &self.name)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateIpSetResponse {
    #[serde(rename = "IPSet")]
    pub ip_set: Option<IpSet>,
    pub change_token: Option<String>,
}

impl_operation!(CreateIpSetRequest => CreateIpSetResponse, "CreateIPSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteIpSetRequest {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: Option<String>,
    pub change_token: Option<String>,
}

fluent_setters!(DeleteIpSetRequest {
    with_ip_set_id => ip_set_id: String,
    with_change_token => change_token: String,
});

impl Validate for DeleteIpSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("IPSetId", &self.ip_set_id)?;
        check_required_identifier("ChangeToken", &self.change_token)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteIpSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(DeleteIpSetRequest => DeleteIpSetResponse, "DeleteIPSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIpSetRequest {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: Option<String>,
}

fluent_setters!(GetIpSetRequest {
    with_ip_set_id => ip_set_id: String,
});

impl Validate for GetIpSetRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_required_identifier("IPSetId", &self.ip_set_id)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIpSetResponse {
    #[serde(rename = "IPSet")]
    pub ip_set: Option<IpSet>,
}

impl_operation!(GetIpSetRequest => GetIpSetResponse, "GetIPSet");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIpSetsRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
}

fluent_setters!(ListIpSetsRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
});

impl Validate for ListIpSetsRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListIpSetsResponse {
    pub next_marker: Option<String>,
    #[serde(rename = "IPSets")]
    pub ip_sets: Option<Vec<IpSetSummary>>,
}

impl_operation!(ListIpSetsRequest => ListIpSetsResponse, "ListIPSets");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateIpSetRequest {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: Option<String>,
    pub change_token: Option<String>,
    pub updates: Option<Vec<IpSetUpdate>>,
}

fluent_setters!(UpdateIpSetRequest {
    with_ip_set_id => ip_set_id: String,
    with_change_token => change_token: String,
    with_updates => updates: Vec<IpSetUpdate>,
});

impl_update_set!(UpdateIpSetRequest, IpSetDescriptor, ip_set_id, "IPSetId");

impl Validate for UpdateIpSetRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        validate_update_set(self, config)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateIpSetResponse {
    pub change_token: Option<String>,
}

impl_operation!(UpdateIpSetRequest => UpdateIpSetResponse, "UpdateIPSet");
