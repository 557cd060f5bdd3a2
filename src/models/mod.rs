use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property being appraised
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[serde(rename = "Condominium Unit")]
    CondominiumUnit,
    #[serde(rename = "House and Lot")]
    HouseAndLot,
    #[serde(rename = "Townhouse")]
    Townhouse,
    #[serde(rename = "Vacant Lot")]
    VacantLot,
    #[serde(rename = "Commercial Space")]
    CommercialSpace,
    #[serde(rename = "Beach Property")]
    BeachProperty,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::CondominiumUnit,
        PropertyType::HouseAndLot,
        PropertyType::Townhouse,
        PropertyType::VacantLot,
        PropertyType::CommercialSpace,
        PropertyType::BeachProperty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::CondominiumUnit => "Condominium Unit",
            PropertyType::HouseAndLot => "House and Lot",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::VacantLot => "Vacant Lot",
            PropertyType::CommercialSpace => "Commercial Space",
            PropertyType::BeachProperty => "Beach Property",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Accepts the display label or a dashed/underscored shorthand
    /// ("condominium-unit", "vacant_lot"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();

        PropertyType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = PropertyType::ALL.iter().map(|t| t.label()).collect();
                format!("unknown property type '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Details entered by the user for a single appraisal request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub city: String,
    #[serde(default)]
    pub building_name: Option<String>,
    pub property_type: PropertyType,
    pub size_sqm: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

/// One point of the 5-year price history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceTrendPoint {
    pub year: String,
    pub price: f64,
}

/// Valuation estimate, either from the model or the local formula
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalResult {
    pub min_price: f64,
    pub max_price: f64,
    pub average_price: f64,
    pub currency: String,
    pub analysis: String,
    pub price_trend: Vec<PriceTrendPoint>,
    pub comparable_highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
}

/// Daily digest of real-estate news
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketTrendsData {
    pub date: String,
    pub items: Vec<NewsItem>,
}

/// Price band of a heatmap sub-area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceLevel {
    Budget,
    #[serde(rename = "Mid-End")]
    MidEnd,
    #[serde(rename = "High-End")]
    HighEnd,
    Luxury,
}

impl PriceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PriceLevel::Budget => "Budget",
            PriceLevel::MidEnd => "Mid-End",
            PriceLevel::HighEnd => "High-End",
            PriceLevel::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapZone {
    pub area_name: String,
    pub avg_price_sqm: f64,
    pub price_level: PriceLevel,
    pub description: String,
    pub growth_rate: String,
}

/// Per-sqm price breakdown of the sub-areas of a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapData {
    pub location: String,
    pub last_updated: String,
    pub zones: Vec<HeatmapZone>,
    pub summary: String,
}

/// Areas offered in the heatmap picker
pub const HEATMAP_LOCATIONS: [&str; 13] = [
    "Makati City",
    "Bonifacio Global City",
    "Manila Bay Area",
    "Pasay City",
    "Quezon City",
    "Ortigas Center",
    "Clark and Pampanga",
    "Nuvali / Sta. Rosa",
    "Alabang",
    "Cebu City",
    "Davao City",
    "Palawan",
    "Siargao",
];

/// Date as shown to users and sent to the model, e.g. `October 18, 2026`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a peso amount as whole pesos with thousands separators, e.g. `₱12,500,000`
pub fn format_php(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-₱{}", grouped)
    } else {
        format!("₱{}", grouped)
    }
}

/// Compact peso amount, e.g. `₱12.5M` or `₱250K`
pub fn format_php_compact(amount: f64) -> String {
    let abs = amount.abs();
    let (scaled, suffix) = if abs >= 1_000_000_000.0 {
        (amount / 1_000_000_000.0, "B")
    } else if abs >= 1_000_000.0 {
        (amount / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (amount / 1_000.0, "K")
    } else {
        return format_php(amount);
    };

    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("₱{}{}", text, suffix)
}
