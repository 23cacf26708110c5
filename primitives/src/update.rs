//! The envelope shared by every `Update*` action.
//!
//! A batch is an ordered list of `INSERT` / `DELETE` entries applied to one
//! resource and guarded by a change token. There is no in-place modify:
//! changing an entry means deleting the old value & inserting the new one
//! in the same batch, see [`UpdateSetRequest::replace`].
use crate::{
    config::Config,
    validator::{check_duplicates, check_identifier, required, Error, Validate},
};
use parse_display::{Display, FromStr};
use serde::{
    de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, hash::Hash, marker::PhantomData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[display(style = "SNAKE_CASE")]
pub enum ChangeAction {
    Insert,
    Delete,
}

/// A value that can be inserted into or deleted from a resource by an update batch.
pub trait UpdatePayload: Serialize + DeserializeOwned {
    /// Wire name of the member holding the payload, e.g. `IPSetDescriptor`
    const FIELD: &'static str;
}

/// One `{ Action, <payload> }` entry of an update batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Update<T> {
    pub action: Option<ChangeAction>,
    pub payload: Option<T>,
}

impl<T> Update<T> {
    pub fn new(action: ChangeAction, payload: T) -> Self {
        Self {
            action: Some(action),
            payload: Some(payload),
        }
    }

    pub fn insert(payload: T) -> Self {
        Self::new(ChangeAction::Insert, payload)
    }

    pub fn delete(payload: T) -> Self {
        Self::new(ChangeAction::Delete, payload)
    }

    pub fn is_insert(&self) -> bool {
        self.action == Some(ChangeAction::Insert)
    }

    pub fn is_delete(&self) -> bool {
        self.action == Some(ChangeAction::Delete)
    }
}

impl<T: UpdatePayload + Validate> Validate for Update<T> {
    fn validate(&self, config: &Config) -> Result<(), Error> {
        required("Action", &self.action)?;
        required(T::FIELD, &self.payload)?.validate(config)
    }
}

impl<T: UpdatePayload> Serialize for Update<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = usize::from(self.action.is_some()) + usize::from(self.payload.is_some());
        let mut map = serializer.serialize_map(Some(len))?;

        if let Some(action) = &self.action {
            map.serialize_entry("Action", action)?;
        }

        if let Some(payload) = &self.payload {
            map.serialize_entry(T::FIELD, payload)?;
        }

        map.end()
    }
}

impl<'de, T: UpdatePayload> Deserialize<'de> for Update<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UpdateVisitor(PhantomData))
    }
}

struct UpdateVisitor<T>(PhantomData<T>);

impl<'de, T: UpdatePayload> Visitor<'de> for UpdateVisitor<T> {
    type Value = Update<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "an object with `Action` & `{}`", T::FIELD)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut action: Option<Option<ChangeAction>> = None;
        let mut payload: Option<Option<T>> = None;

        while let Some(key) = map.next_key::<String>()? {
            if key == "Action" {
                if action.is_some() {
                    return Err(de::Error::duplicate_field("Action"));
                }
                action = Some(map.next_value()?);
            } else if key == T::FIELD {
                if payload.is_some() {
                    return Err(de::Error::duplicate_field(T::FIELD));
                }
                payload = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Update {
            action: action.flatten(),
            payload: payload.flatten(),
        })
    }
}

/// A request applying an ordered batch of [`Update`]s to one resource.
pub trait UpdateSetRequest: Sized {
    type Payload: UpdatePayload;
    /// Wire name of the resource id member, e.g. `IPSetId`
    const RESOURCE_ID_FIELD: &'static str;

    fn resource_id(&self) -> Option<&str>;
    fn change_token(&self) -> Option<&str>;
    fn updates(&self) -> Option<&[Update<Self::Payload>]>;
    fn updates_mut(&mut self) -> &mut Vec<Update<Self::Payload>>;

    /// Appends an `INSERT` of `payload` to the end of the batch
    #[must_use]
    fn insert(mut self, payload: impl Into<Self::Payload>) -> Self {
        self.updates_mut().push(Update::insert(payload.into()));
        self
    }

    /// Appends a `DELETE` of `payload` to the end of the batch
    #[must_use]
    fn delete(mut self, payload: impl Into<Self::Payload>) -> Self {
        self.updates_mut().push(Update::delete(payload.into()));
        self
    }

    /// Appends a `DELETE` of `old` followed by an `INSERT` of `new`
    #[must_use]
    fn replace(self, old: impl Into<Self::Payload>, new: impl Into<Self::Payload>) -> Self {
        self.delete(old).insert(new)
    }
}

/// Checks the members every update batch has:
/// the resource id, the change token & a non-empty list of complete entries.
pub fn validate_update_set<R>(request: &R, config: &Config) -> Result<(), Error>
where
    R: UpdateSetRequest,
    R::Payload: Validate + Eq + Hash,
{
    check_update_set(request, config, false)
}

/// Same as [`validate_update_set`] but accepts an empty `Updates` list,
/// for the actions that change other members of the resource in the same request.
pub fn validate_update_set_allowing_empty<R>(request: &R, config: &Config) -> Result<(), Error>
where
    R: UpdateSetRequest,
    R::Payload: Validate + Eq + Hash,
{
    check_update_set(request, config, true)
}

fn check_update_set<R>(request: &R, config: &Config, allow_empty: bool) -> Result<(), Error>
where
    R: UpdateSetRequest,
    R::Payload: Validate + Eq + Hash,
{
    let resource_id = request
        .resource_id()
        .ok_or(Error::Missing(R::RESOURCE_ID_FIELD))?;
    check_identifier(R::RESOURCE_ID_FIELD, resource_id)?;

    let change_token = request.change_token().ok_or(Error::Missing("ChangeToken"))?;
    check_identifier("ChangeToken", change_token)?;

    let updates = request.updates().ok_or(Error::Missing("Updates"))?;
    if updates.is_empty() && !allow_empty {
        return Err(Error::EmptyUpdates);
    }

    updates
        .iter()
        .try_for_each(|update| update.validate(config))?;

    check_duplicates(updates, config)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ip_set::{IpSetDescriptor, IpSetDescriptorType};
    use pretty_assertions::assert_eq;
    use serde_json::{from_value, json, to_value};

    fn descriptor(value: &str) -> IpSetDescriptor {
        IpSetDescriptor::new(IpSetDescriptorType::Ipv4, value)
    }

    #[test]
    fn serializes_payload_under_its_member_name() {
        let update = Update::insert(descriptor("192.0.2.44/32"));

        let expected = json!({
            "Action": "INSERT",
            "IPSetDescriptor": { "Type": "IPV4", "Value": "192.0.2.44/32" }
        });
        assert_eq!(expected, to_value(&update).expect("Should serialize"));
        assert_eq!(update, from_value(expected).expect("Should deserialize"));
    }

    #[test]
    fn absent_members_stay_absent() {
        let update: Update<IpSetDescriptor> = Update {
            action: Some(ChangeAction::Delete),
            payload: None,
        };

        assert_eq!(json!({ "Action": "DELETE" }), to_value(&update).unwrap());
        assert_eq!(
            update,
            from_value::<Update<IpSetDescriptor>>(json!({ "Action": "DELETE", "Unknown": 1 }))
                .unwrap()
        );
    }

    #[test]
    fn modify_is_not_an_action() {
        let result = from_value::<Update<IpSetDescriptor>>(json!({
            "Action": "MODIFY",
            "IPSetDescriptor": { "Type": "IPV4", "Value": "192.0.2.44/32" }
        }));
        assert!(result.is_err());

        let duplicated = serde_json::from_str::<Update<IpSetDescriptor>>(
            r#"{ "Action": "INSERT", "Action": "DELETE" }"#,
        );
        assert!(duplicated.is_err());
    }

    #[test]
    fn action_tokens() {
        assert_eq!("INSERT", ChangeAction::Insert.to_string());
        assert_eq!(Some(ChangeAction::Delete), "DELETE".parse::<ChangeAction>().ok());
    }
}
