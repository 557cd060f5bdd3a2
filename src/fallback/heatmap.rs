use crate::models::{display_date, HeatmapData, HeatmapZone, PriceLevel};
use chrono::NaiveDate;

/// (area suffix, avg price per sqm, tier, description, growth)
const ZONES: [(&str, f64, PriceLevel, &str, &str); 6] = [
    (
        "Central Business District",
        280_000.0,
        PriceLevel::Luxury,
        "Prime towers near offices and malls",
        "+6.5%",
    ),
    (
        "Waterfront",
        210_000.0,
        PriceLevel::HighEnd,
        "Newer high-rises with views",
        "+5.2%",
    ),
    (
        "Uptown Residential",
        165_000.0,
        PriceLevel::HighEnd,
        "Gated villages and mid-rise condos",
        "+4.1%",
    ),
    (
        "Transit Corridor",
        120_000.0,
        PriceLevel::MidEnd,
        "Condos along rail and bus lines",
        "+3.8%",
    ),
    (
        "Old Town",
        95_000.0,
        PriceLevel::MidEnd,
        "Established neighborhoods, older stock",
        "+2.0%",
    ),
    (
        "Outskirts",
        60_000.0,
        PriceLevel::Budget,
        "Townhouses and lots on the fringe",
        "+1.5%",
    ),
];

/// Canned six-zone heatmap labelled with the requested location
pub fn fallback_heatmap(location: &str, today: NaiveDate) -> HeatmapData {
    let location = location.trim();

    HeatmapData {
        location: location.to_string(),
        last_updated: display_date(today),
        zones: ZONES
            .iter()
            .map(|(suffix, price, level, description, growth)| HeatmapZone {
                area_name: format!("{} {}", location, suffix),
                avg_price_sqm: *price,
                price_level: *level,
                description: description.to_string(),
                growth_rate: growth.to_string(),
            })
            .collect(),
        summary: format!(
            "Prices in {} are highest around the business district and taper toward the outskirts. \
             These are indicative figures only; live market data is currently unavailable.",
            location
        ),
    }
}
