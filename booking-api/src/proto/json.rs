//! Serde helpers for the proto3 JSON mapping.
//!
//! A `null` member reads as the field's default value.

use serde::{Deserialize, Deserializer};

/// Deserializes a field whose JSON value may be `null`.
///
/// # Errors
///
/// Will return the deserializer's error if a non-null value does not
/// deserialize as `T`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `int64` fields are written as decimal strings and read from either a
/// string or a number.
pub mod int64 {
    use std::fmt::{self, Formatter};

    use serde::{Deserializer, Serializer, de};

    /// Serializes an `i64` as a string.
    ///
    /// # Errors
    ///
    /// Will return the serializer's error if string serialization fails.
    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes an `i64` from a string or an integral number.
    ///
    /// # Errors
    ///
    /// Will return the deserializer's error if the value is neither an
    /// integer nor a string holding one.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = i64;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("64-bit integer or string containing one")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value).map_err(|_| E::custom("int64 value out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.trim().parse().map_err(E::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// `int32` fields are written as numbers and read from either a number or a
/// string.
pub mod int32 {
    use std::fmt::{self, Formatter};

    use serde::{Deserializer, Serializer, de};

    /// Serializes an `i32` as a number.
    ///
    /// # Errors
    ///
    /// Will return the serializer's error if number serialization fails.
    pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(*value)
    }

    /// Deserializes an `i32` from an integral number or a string.
    ///
    /// # Errors
    ///
    /// Will return the deserializer's error if the value is neither an
    /// integer in range nor a string holding one.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = i32;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("32-bit integer or string containing one")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(value).map_err(|_| E::custom("int32 value out of range"))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(value).map_err(|_| E::custom("int32 value out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.trim().parse().map_err(E::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}
