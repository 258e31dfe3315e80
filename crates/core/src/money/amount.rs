use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::utils::number_utils::parse_decimal;

/// A numeric record field as the backend may hold it.
///
/// The backend accepts numbers, numeric strings, blanks and `null` in the
/// same column, so each state is kept distinct instead of being folded into
/// zero. Callers decide per use how `Missing` and `Malformed` are treated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Amount {
    /// `null`, absent, or a blank string.
    #[default]
    Missing,
    Value(Decimal),
    /// Text that is not a number. Kept verbatim so a full replace does not
    /// destroy it.
    Malformed(String),
}

impl Amount {
    /// Parses operator-entered text. Blank text is `Missing`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Amount::Missing;
        }
        match parse_decimal(raw) {
            Some(value) => Amount::Value(value),
            None => Amount::Malformed(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// Value with `Missing` and `Malformed` both read as zero.
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Amount::Malformed(_))
    }

    /// Text for an edit field: the number, the original bad text, or blank.
    pub fn to_input_string(&self) -> String {
        match self {
            Amount::Missing => String::new(),
            Amount::Value(value) => value.normalize().to_string(),
            Amount::Malformed(raw) => raw.clone(),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Value(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Missing => serializer.serialize_none(),
            Amount::Value(value) => Serialize::serialize(value, serializer),
            Amount::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::Value(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::Value(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Decimal::from_f64(v)
            .map(Amount::Value)
            .ok_or_else(|| E::custom(format!("number {} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Ok(Amount::parse(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Amount, E> {
        Ok(Amount::Malformed(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
