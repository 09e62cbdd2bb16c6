use lazy_static::lazy_static;
use regex::Regex;
use serde::de::Visitor;
use serde_with::DeserializeAs;
use std::fmt;

/// Read the leading number out of a loosely formatted string.
/// Thousands separators are ignored, trailing units are dropped.
///
/// ## Example
/// ```txt
/// "3.2"        -> 3.2
/// "3.2 GHz"    -> 3.2
/// " 1,024 MB"  -> 1024.0
/// "5nm"        -> 5.0
/// "N/A"        -> None
/// ```
pub(crate) fn parse_leading_number<T: AsRef<str>>(s: T) -> Option<f64> {
    lazy_static! {
        static ref RE_LEADING_NUMBER: Regex =
            Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
    }

    let cleaned = s.as_ref().trim_start().replace(',', "");
    RE_LEADING_NUMBER
        .find(cleaned.as_str())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Round to one decimal place, the precision every score is reported at.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Accept either a JSON number or a string holding a number.
/// Strings go through [`parse_leading_number`].
pub struct LenientNumber;

impl<'de> DeserializeAs<'de, f64> for LenientNumber {
    fn deserialize_as<D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Helper;

        impl<'de> Visitor<'de> for Helper {
            type Value = f64;

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                parse_leading_number(v)
                    .ok_or_else(|| E::custom(format!("no number at the start of {:?}", v)))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v as f64)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v as f64)
            }

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, or a string starting with a number")
            }
        }

        deserializer.deserialize_any(Helper)
    }
}

/// Accept a string, or a scalar that can be shown as one.
/// Used for descriptive fields that are only ever displayed.
pub struct LenientText;

impl<'de> DeserializeAs<'de, String> for LenientText {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Helper;

        impl<'de> Visitor<'de> for Helper {
            type Value = String;

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v)
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a scalar value")
            }
        }

        deserializer.deserialize_any(Helper)
    }
}
