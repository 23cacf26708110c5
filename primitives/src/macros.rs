/// Generates consuming `with_*` setters for the optional members of a wire shape.
///
/// ```ignore
/// fluent_setters!(FieldToMatch {
///     with_type => match_type: MatchFieldType,
///     with_data => data: String,
/// });
/// ```
macro_rules! fluent_setters {
    ($shape:ty { $($setter:ident => $field:ident : $value:ty),* $(,)? }) => {
        impl $shape {
            $(
                #[must_use]
                pub fn $setter(mut self, value: impl Into<$value>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

/// Binds a request shape to its API action name & response shape.
macro_rules! impl_operation {
    ($request:ty => $response:ty, $name:literal) => {
        impl $crate::operation::Operation for $request {
            const NAME: &'static str = $name;
            type Response = $response;
        }
    };
    (regional $request:ty => $response:ty, $name:literal) => {
        impl $crate::operation::Operation for $request {
            const NAME: &'static str = $name;
            const REGIONAL_ONLY: bool = true;
            type Response = $response;
        }
    };
}

/// Implements [`UpdateSetRequest`](crate::update::UpdateSetRequest) for a request with
/// `change_token` & `updates` members and the given resource id member.
macro_rules! impl_update_set {
    ($request:ty, $payload:ty, $id:ident, $wire_id:literal) => {
        impl $crate::update::UpdateSetRequest for $request {
            type Payload = $payload;
            const RESOURCE_ID_FIELD: &'static str = $wire_id;

            fn resource_id(&self) -> Option<&str> {
                self.$id.as_deref()
            }

            fn change_token(&self) -> Option<&str> {
                self.change_token.as_deref()
            }

            fn updates(&self) -> Option<&[$crate::update::Update<$payload>]> {
                self.updates.as_deref()
            }

            fn updates_mut(&mut self) -> &mut Vec<$crate::update::Update<$payload>> {
                self.updates.get_or_insert_with(Vec::new)
            }
        }
    };
}
