use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A whole-rupee currency amount.
///
/// The backend sends amounts as JSON numbers in some payloads and as numeric strings
/// in others, so deserialization accepts both. Serialization always produces a number;
/// payloads that need the textual form (such as the order request) call
/// [`Amount::to_string`] explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct Amount(pub u64);

/// The ways a textual amount can fail to parse.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The value was not a number at all
    #[error("not a currency amount: {0:?}")]
    NotANumber(String),
    /// The value was negative or had a fractional part
    #[error("currency amounts must be whole, non-negative rupees: {0}")]
    NotWhole(f64),
}

impl Amount {
    /// The value in rupees.
    pub fn rupees(self) -> u64 {
        self.0
    }

    /// The value in paise, the subunit the payment checkout works in.
    pub fn paise(self) -> u64 {
        self.0.saturating_mul(100)
    }

    fn from_float(value: f64) -> Result<Self, AmountError> {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Ok(Self(value as u64))
        } else {
            Err(AmountError::NotWhole(value))
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Ok(Self(value));
        }
        // "499.00" shows up now and then
        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_float(value),
            Err(_) => Err(AmountError::NotANumber(s.to_owned())),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_untagged::UntaggedEnumVisitor::new()
            .u64(|value| Ok(Self(value)))
            .f64(|value| Self::from_float(value).map_err(serde::de::Error::custom))
            .string(|value| value.parse().map_err(serde::de::Error::custom))
            .deserialize(deserializer)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Formats the bare number, e.g. `1499`. See [`Amount::display_inr`] for the grouped form.
impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Amount {
    /// Render as Indian rupees with lakh/crore digit grouping, e.g. `₹12,34,567`.
    pub fn display_inr(self) -> String {
        let digits = self.0.to_string();
        if digits.len() <= 3 {
            return format!("₹{digits}");
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();

        format!("₹{},{}", groups.join(","), tail)
    }
}
