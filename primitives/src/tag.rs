//! Tags on rules, rule groups & web ACLs.
use crate::{
    config::Config,
    validator::{
        check_length, check_marker, check_optional_marker, check_optional_range, required, Error,
        Validate, LIST_LIMIT, TAG_KEY_LENGTH, TAG_VALUE_LENGTH,
    },
};
use serde::{Deserialize, Serialize};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

fluent_setters!(Tag {
    with_key => key: String,
    with_value => value: String,
});

impl Validate for Tag {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        let key = required("Tag.Key", &self.key)?;
        check_length("Tag.Key", key.chars().count(), TAG_KEY_LENGTH)?;
        let value = required("Tag.Value", &self.value)?;

        check_length("Tag.Value", value.chars().count(), TAG_VALUE_LENGTH)
    }
}

/// The tags of a single resource
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagInfoForResource {
    #[serde(rename = "ResourceARN")]
    pub resource_arn: Option<String>,
    pub tag_list: Option<Vec<Tag>>,
}

fluent_setters!(TagInfoForResource {
    with_resource_arn => resource_arn: String,
    with_tag_list => tag_list: Vec<Tag>,
});

/// Checks an optional tag list given on create, which must not be empty when present
pub(crate) fn check_tags(tags: &Option<Vec<Tag>>, config: &Config) -> Result<(), Error> {
    match tags {
        Some(tags) => {
            if tags.is_empty() {
                return Err(Error::EmptyList("Tags"));
            }
            tags.validate(config)
        }
        None => Ok(()),
    }
}

fn check_resource_arn(arn: &Option<String>) -> Result<(), Error> {
    check_marker("ResourceARN", required("ResourceARN", arn)?)
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResourceRequest {
    #[serde(rename = "ResourceARN")]
    pub resource_arn: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

fluent_setters!(TagResourceRequest {
    with_resource_arn => resource_arn: String,
    with_tags => tags: Vec<Tag>,
});

impl TagResourceRequest {
    /// Appends a single tag
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(Vec::new)
            .push(Tag::new(key, value));
        self
    }
}

impl Validate for TagResourceRequest {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        check_resource_arn(&self.resource_arn)?;
        required("Tags", &self.tags)?;

        check_tags(&self.tags, config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagResourceResponse {}

impl_operation!(TagResourceRequest => TagResourceResponse, "TagResource");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UntagResourceRequest {
    #[serde(rename = "ResourceARN")]
    pub resource_arn: Option<String>,
    pub tag_keys: Option<Vec<String>>,
}

fluent_setters!(UntagResourceRequest {
    with_resource_arn => resource_arn: String,
    with_tag_keys => tag_keys: Vec<String>,
});

impl Validate for UntagResourceRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_resource_arn(&self.resource_arn)?;
        let keys = required("TagKeys", &self.tag_keys)?;
        if keys.is_empty() {
            return Err(Error::EmptyList("TagKeys"));
        }

        keys.iter()
            .try_for_each(|key| check_length("TagKeys", key.chars().count(), TAG_KEY_LENGTH))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UntagResourceResponse {}

impl_operation!(UntagResourceRequest => UntagResourceResponse, "UntagResource");

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceRequest {
    pub next_marker: Option<String>,
    pub limit: Option<i64>,
    #[serde(rename = "ResourceARN")]
    pub resource_arn: Option<String>,
}

fluent_setters!(ListTagsForResourceRequest {
    with_next_marker => next_marker: String,
    with_limit => limit: i64,
    with_resource_arn => resource_arn: String,
});

impl Validate for ListTagsForResourceRequest {
    fn validate(&self, _config: &Config) -> Result<(), Error> {
        check_optional_marker("NextMarker", &self.next_marker)?;
        check_optional_range("Limit", self.limit, LIST_LIMIT)?;

        check_resource_arn(&self.resource_arn)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceResponse {
    pub next_marker: Option<String>,
    pub tag_info_for_resource: Option<TagInfoForResource>,
}

impl_operation!(ListTagsForResourceRequest => ListTagsForResourceResponse, "ListTagsForResource");
