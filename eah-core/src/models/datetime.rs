use std::fmt::Display;
use time::{
    OffsetDateTime, PrimitiveDateTime, Time, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// A calendar date (with an optional time of day) sent by the backend.
///
/// Auction dates arrive either as full RFC3339 timestamps or as bare `YYYY-MM-DD`
/// dates. Both are accepted; bare dates are taken as midnight UTC. Serialization
/// always emits RFC3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(OffsetDateTime);

impl Date {
    /// Parse either an RFC3339 timestamp or a bare calendar date.
    pub fn parse(value: &str) -> Result<Self, time::error::Parse> {
        let value = value.trim();
        match OffsetDateTime::parse(value, &Rfc3339) {
            Ok(datetime) => Ok(Self(datetime)),
            Err(err) => {
                let Ok(date) = time::Date::parse(value, format_description!("[year]-[month]-[day]"))
                else {
                    return Err(err);
                };
                Ok(Self(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc()))
            }
        }
    }

    /// The underlying timestamp.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.0
    }

    /// The calendar day of this date.
    pub fn day(&self) -> time::Date {
        self.0.date()
    }
}

impl From<OffsetDateTime> for Date {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl From<time::Date> for Date {
    fn from(value: time::Date) -> Self {
        Self(PrimitiveDateTime::new(value, Time::MIDNIGHT).assume_utc())
    }
}

/// Formats as `Mar 05, 2025`.
impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .0
            .format(format_description!("[month repr:short] [day], [year]"))
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let formatted = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Date {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Date".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}
