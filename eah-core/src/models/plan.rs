use crate::models::{Amount, PlanId};
use serde::{Deserialize, Deserializer, Serialize};

/// A purchasable subscription option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlanTier {
    /// Identifier of the plan
    pub id: PlanId,
    /// How long the subscription lasts; 90, 180 and 365 are the known tiers
    #[serde(deserialize_with = "days")]
    #[cfg_attr(feature = "schemars", schemars(with = "u32"))]
    pub duration_in_days: u32,
    /// Price of the plan in rupees
    pub amount: Amount,
}

impl PlanTier {
    /// The named tier this plan's duration corresponds to.
    pub fn kind(&self) -> PlanKind {
        PlanKind::from_days(self.duration_in_days)
    }
}

/// The named subscription tiers, derived from a plan's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKind {
    /// 90 days
    Quarterly,
    /// 180 days
    HalfYear,
    /// 365 days
    Yearly,
    /// Any other duration
    Unknown,
}

impl PlanKind {
    /// Classify a duration.
    pub fn from_days(days: u32) -> Self {
        match days {
            90 => Self::Quarterly,
            180 => Self::HalfYear,
            365 => Self::Yearly,
            _ => Self::Unknown,
        }
    }

    /// The title shown for the tier.
    pub fn title(self) -> &'static str {
        match self {
            Self::Quarterly => "Quarterly Plan",
            Self::HalfYear => "Half Year Plan",
            Self::Yearly => "Yearly Plan",
            Self::Unknown => "N/A",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// durations share the string-or-number looseness of amounts
fn days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    serde_untagged::UntaggedEnumVisitor::new()
        .u64(|value| u32::try_from(value).map_err(serde::de::Error::custom))
        .string(|value| value.trim().parse().map_err(serde::de::Error::custom))
        .deserialize(deserializer)
}

/// The plan list of one checkout screen, keyed by id in server order.
///
/// Lookups by id are needed to start a purchase, while presentation wants the
/// order the backend returned, so this wraps an insertion-ordered map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanCatalog(indexmap::IndexMap<PlanId, PlanTier, rustc_hash::FxBuildHasher>);

impl PlanCatalog {
    /// Look up a plan by id.
    pub fn plan(&self, id: &PlanId) -> Option<&PlanTier> {
        self.0.get(id)
    }
}

impl std::ops::Deref for PlanCatalog {
    type Target = indexmap::IndexMap<PlanId, PlanTier, rustc_hash::FxBuildHasher>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<PlanTier> for PlanCatalog {
    fn from_iter<I: IntoIterator<Item = PlanTier>>(iter: I) -> Self {
        Self(iter.into_iter().map(|plan| (plan.id.clone(), plan)).collect())
    }
}

impl IntoIterator for PlanCatalog {
    type Item = (PlanId, PlanTier);
    type IntoIter = indexmap::map::IntoIter<PlanId, PlanTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
