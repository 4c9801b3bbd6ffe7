use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A category tag such as `{"alias": "pizza", "title": "Pizza"}`.
///
/// Keys other than `alias` and `title` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(alias: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// Typed view of a record's `coordinates`, used only to decide whether it is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        Coordinates::deserialize(value)
    }

    /// Both sides present and nonzero.
    ///
    /// Zero counts as missing, so a point on the equator or the prime
    /// meridian is rejected along with null and absent values.
    pub fn is_usable(&self) -> bool {
        matches!(
            (self.latitude, self.longitude),
            (Some(latitude), Some(longitude)) if latitude != 0.0 && longitude != 0.0
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub display_address: Vec<String>,
}

/// One input line.
///
/// Only the fields needed before filtering are typed up front; everything
/// else stays in `fields` and is decoded into [`RestaurantDetails`] for the
/// records that survive the coordinate filter.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRecord {
    #[serde(skip)]
    pub line: usize,
    pub categories: Vec<Category>,
    /// Written back unchanged; see [`Coordinates`] for the filter view.
    pub coordinates: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl InputRecord {
    pub fn alias(&self) -> Option<&str> {
        self.fields.get("alias").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantDetails {
    pub name: String,
    pub alias: String,
    pub image_url: String,
    #[serde(default)]
    pub neighborhood: Value,
    pub rating: Value,
    pub review_count: i64,
    pub url: String,
    pub display_phone: String,
    pub location: Location,
    pub is_closed: bool,
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Inexpensive,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Pricey,
    #[serde(rename = "$$$$")]
    UltraHighEnd,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Inexpensive,
        PriceTier::Moderate,
        PriceTier::Pricey,
        PriceTier::UltraHighEnd,
    ];

    /// Exact match only: `"$$ "` or `"$$$$$"` are not tiers.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "$" => Some(PriceTier::Inexpensive),
            "$$" => Some(PriceTier::Moderate),
            "$$$" => Some(PriceTier::Pricey),
            "$$$$" => Some(PriceTier::UltraHighEnd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Inexpensive => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Pricey => "$$$",
            PriceTier::UltraHighEnd => "$$$$",
        }
    }
}

/// The flattened record written to the output, fields in output order.
///
/// `neighborhood`, `rating` and `coordinates` keep the input's JSON verbatim,
/// so `4` stays `4` and extra coordinate keys survive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub name: String,
    pub alias: String,
    pub image_url: String,
    pub neighborhood: Value,
    pub category: Option<Category>,
    pub rating: Value,
    pub review_count: i64,
    pub url: String,
    pub coordinates: Value,
    pub display_phone: String,
    pub display_address: Vec<String>,
    pub is_closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceTier>,
}

/// How many records list each category alias, over the whole input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: HashMap<String, usize>,
}

impl CategoryCounts {
    pub fn increment(&mut self, alias: &str) {
        match self.counts.get_mut(alias) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(alias.to_string(), 1);
            }
        }
    }

    /// Unknown aliases count as zero.
    pub fn get(&self, alias: &str) -> usize {
        self.counts.get(alias).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent aliases, count descending then alias ascending.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(alias, count)| (alias.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

impl<'a> FromIterator<&'a str> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = CategoryCounts::default();
        for alias in iter {
            counts.increment(alias);
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub records_read: usize,
    pub records_kept: usize,
    pub dropped_missing_coordinates: usize,
    pub without_category: usize,
    pub with_price: usize,
    pub invalid_price: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub category_counts: CategoryCounts,
    pub summary: TransformSummary,
}
