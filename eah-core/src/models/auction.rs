use crate::models::{
    Amount, ApplicationError, AssetTypeId, AuctionId, CityId, Date, SUCCESS_STATUS,
};
use serde::{Deserialize, Deserializer, Serialize};

/// The fixed number of auction records requested per page.
pub const PAGE_LIMIT: u32 = 10;

/// The kind of property being auctioned.
///
/// The backend sends a free-form label. Only "Flat" is singled out (it picks the
/// apartment artwork); everything else is treated as land or other property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetType {
    /// A residential flat
    Flat,
    /// Any other label, preserved verbatim
    Other(String),
}

impl AssetType {
    /// Whether the record describes a flat.
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat)
    }

    /// The label as the backend sent it.
    pub fn label(&self) -> &str {
        match self {
            Self::Flat => "Flat",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for AssetType {
    fn from(value: String) -> Self {
        if value == "Flat" {
            Self::Flat
        } else {
            Self::Other(value)
        }
    }
}

impl From<AssetType> for String {
    fn from(value: AssetType) -> Self {
        match value {
            AssetType::Flat => "Flat".to_owned(),
            AssetType::Other(label) => label,
        }
    }
}

impl Serialize for AssetType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for AssetType {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "AssetType".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "examples": ["Flat", "Land"],
        })
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single bank-auctioned property listing.
///
/// Records are defined by the backend and consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuctionRecord {
    /// Unique identifier of the listing
    pub id: AuctionId,
    /// The kind of property
    pub asset_type: AssetType,
    /// The city the property is located in
    pub city: String,
    /// The bank running the auction
    pub bank: String,
    /// Reserve price in rupees
    pub reserve_price: Amount,
    /// The auction date
    pub start_date: Date,
    /// The last day to apply, when the bank publishes one
    #[serde(
        rename = "applicationDeadLine",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<Date>"))]
    pub application_dead_line: Option<Date>,
}

/// The filter pair a listing screen is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuctionFilter {
    /// The city to search in
    pub city_id: CityId,
    /// The kind of asset to search for
    pub asset_type_id: AssetTypeId,
}

impl AuctionFilter {
    /// Build a filter pair.
    pub fn new(city_id: impl Into<CityId>, asset_type_id: impl Into<AssetTypeId>) -> Self {
        Self {
            city_id: city_id.into(),
            asset_type_id: asset_type_id.into(),
        }
    }
}

/// The query string of `GET auction/search`.
///
/// Field order matches the order the parameters appear in the request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuctionQuery {
    /// The asset type filter
    pub asset_type_id: AssetTypeId,
    /// The city filter
    pub city_id: CityId,
    /// 1-based page index
    pub page: u32,
    /// Records per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    PAGE_LIMIT
}

impl AuctionQuery {
    /// The query for one page of the given filter, with the fixed page size.
    pub fn new(filter: &AuctionFilter, page: u32) -> Self {
        Self {
            asset_type_id: filter.asset_type_id.clone(),
            city_id: filter.city_id.clone(),
            page,
            limit: PAGE_LIMIT,
        }
    }

    /// The filter pair this query searches with.
    pub fn filter(&self) -> AuctionFilter {
        AuctionFilter {
            city_id: self.city_id.clone(),
            asset_type_id: self.asset_type_id.clone(),
        }
    }
}

/// The response envelope of `GET auction/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    /// The application-level status; [`SUCCESS_STATUS`] means success
    pub status_code: u16,
    /// The records of the requested page
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "schemars", schemars(with = "Vec<AuctionRecord>"))]
    pub data: Vec<AuctionRecord>,
    /// The index of the final page for this filter
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "schemars", schemars(with = "u32"))]
    pub last_page: u32,
    /// An optional human-readable message, usually present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchEnvelope {
    /// A successful envelope.
    pub fn success(data: Vec<AuctionRecord>, last_page: u32) -> Self {
        Self {
            status_code: SUCCESS_STATUS,
            data,
            last_page,
            message: None,
        }
    }

    /// A failure envelope carrying `status_code`.
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data: Vec::new(),
            last_page: 0,
            message: Some(message.into()),
        }
    }

    /// Validate the status and extract the page.
    pub fn into_page(self) -> Result<AuctionPage, ApplicationError> {
        if self.status_code == SUCCESS_STATUS {
            Ok(AuctionPage {
                items: self.data,
                last_page: self.last_page,
            })
        } else {
            Err(ApplicationError {
                status_code: self.status_code,
                message: self.message,
            })
        }
    }
}

/// One successfully fetched page of auction records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuctionPage {
    /// The records of this page, in server order
    pub items: Vec<AuctionRecord>,
    /// The index of the final page for the filter
    pub last_page: u32,
}

/// An empty or blank date string means no date.
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => Date::parse(raw.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
