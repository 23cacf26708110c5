/// (De)serializes an optional timestamp as seconds since the Unix epoch.
///
/// The service sends whole seconds as integers and sub-second precision as a
/// fractional number, both forms are accepted when deserializing.
/// The wire format carries milliseconds: serializing truncates anything finer
/// and deserializing rounds to the nearest millisecond.
pub mod epoch_seconds_option {
    use chrono::{DateTime, SubsecRound, TimeZone, Utc};
    use serde::{de, Serializer};
    use std::{convert::TryFrom, fmt};

    pub fn serialize<S>(opt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match opt.map(|dt| dt.trunc_subsecs(3)) {
            Some(dt) if dt.timestamp_subsec_millis() == 0 => {
                serializer.serialize_i64(dt.timestamp())
            }
            Some(dt) => serializer.serialize_f64(
                dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_millis()) / 1000.0,
            ),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        de.deserialize_option(OptionEpochSecondsVisitor)
    }

    struct OptionEpochSecondsVisitor;

    impl<'de> de::Visitor<'de> for OptionEpochSecondsVisitor {
        type Value = Option<DateTime<Utc>>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a unix timestamp in seconds or none")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, de: D) -> Result<Self::Value, D::Error>
        where
            D: de::Deserializer<'de>,
        {
            de.deserialize_any(EpochSecondsVisitor).map(Some)
        }
    }

    struct EpochSecondsVisitor;

    impl EpochSecondsVisitor {
        fn from_parts<E: de::Error>(secs: i64, nanos: u32) -> Result<DateTime<Utc>, E> {
            Utc.timestamp_opt(secs, nanos)
                .single()
                .ok_or_else(|| E::custom(format!("timestamp {} is out of range", secs)))
        }
    }

    impl<'de> de::Visitor<'de> for EpochSecondsVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a unix timestamp in seconds")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Self::from_parts(value, 0)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let secs = i64::try_from(value).map_err(E::custom)?;

            Self::from_parts(secs, 0)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !value.is_finite() {
                return Err(E::custom("timestamp should be a finite number"));
            }

            let millis = (value * 1000.0).round();
            if !(i64::MIN as f64..=i64::MAX as f64).contains(&millis) {
                return Err(E::custom(format!("timestamp {} is out of range", value)));
            }

            // a fraction rounding up to 1000 ms carries into the next second
            let millis = millis as i64;
            let nanos = u32::try_from(millis.rem_euclid(1000)).map_err(E::custom)? * 1_000_000;

            Self::from_parts(millis.div_euclid(1000), nanos)
        }
    }
}

/// (De)serializes an optional blob as a base64 string.
pub mod base64_option {
    use serde::{de, Deserialize, Serializer};

    pub fn serialize<S>(opt: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match opt {
            Some(bytes) => serializer.serialize_str(&base64::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        Option::<String>::deserialize(de)?
            .map(|encoded| base64::decode(encoded).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "super::epoch_seconds_option"
        )]
        at: Option<DateTime<Utc>>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "super::base64_option"
        )]
        blob: Option<Vec<u8>>,
    }

    #[test]
    fn whole_seconds_stay_integers() {
        let stamped = Stamped {
            at: Some(Utc.timestamp_opt(1_534_000_000, 0).unwrap()),
            blob: None,
        };

        let value = serde_json::to_value(&stamped).expect("Should serialize");
        assert_eq!(json!({ "at": 1_534_000_000 }), value);

        let back: Stamped = serde_json::from_value(value).expect("Should deserialize");
        assert_eq!(stamped, back);
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let stamped: Stamped =
            serde_json::from_value(json!({ "at": 1_534_000_000.25 })).expect("Should deserialize");

        assert_eq!(
            Some(Utc.timestamp_opt(1_534_000_000, 250_000_000).unwrap()),
            stamped.at
        );
        assert_eq!(
            json!({ "at": 1_534_000_000.25 }),
            serde_json::to_value(&stamped).expect("Should serialize")
        );
    }

    #[test]
    fn precision_is_kept_to_the_millisecond() {
        let instant = Utc.timestamp_opt(1_474_065_000, 123_456).unwrap();
        let stamped = Stamped {
            at: Some(instant),
            blob: None,
        };

        let value = serde_json::to_value(&stamped).expect("Should serialize");
        assert_eq!(json!({ "at": 1_474_065_000 }), value);

        let with_millis = Stamped {
            at: Some(Utc.timestamp_opt(1_474_065_000, 250_999_999).unwrap()),
            blob: None,
        };
        assert_eq!(
            json!({ "at": 1_474_065_000.25 }),
            serde_json::to_value(&with_millis).expect("Should serialize")
        );

        let carried: Stamped =
            serde_json::from_value(json!({ "at": 1_474_065_000.9996 })).expect("Should deserialize");
        assert_eq!(Some(Utc.timestamp_opt(1_474_065_001, 0).unwrap()), carried.at);

        let before_epoch: Stamped =
            serde_json::from_value(json!({ "at": -1.5 })).expect("Should deserialize");
        assert_eq!(
            Some(Utc.timestamp_opt(-2, 500_000_000).unwrap()),
            before_epoch.at
        );
    }

    #[test]
    fn absent_and_null_are_none() {
        let absent: Stamped = serde_json::from_value(json!({})).expect("Should deserialize");
        let null: Stamped =
            serde_json::from_value(json!({ "at": null, "blob": null })).expect("Should deserialize");

        assert_eq!(absent, null);
        assert_eq!(json!({}), serde_json::to_value(&absent).expect("Should serialize"));
    }

    #[test]
    fn blob_is_base64() {
        let stamped = Stamped {
            at: None,
            blob: Some(b"badrefer1".to_vec()),
        };

        let value = serde_json::to_value(&stamped).expect("Should serialize");
        assert_eq!(json!({ "blob": "YmFkcmVmZXIx" }), value);

        let invalid = serde_json::from_value::<Stamped>(json!({ "blob": "not base64!" }));
        assert!(invalid.is_err());
    }
}
