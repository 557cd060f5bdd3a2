use crate::models::{display_date, PropertyDetails};
use chrono::{Duration, NaiveDate};

/// Outlets the daily digest is allowed to cite
pub const NEWS_SOURCES: [&str; 7] = [
    "Philippine Daily Inquirer",
    "BusinessWorld",
    "The Philippine Star",
    "Manila Bulletin",
    "BusinessMirror",
    "Rappler",
    "Lamudi Journal",
];

pub fn appraisal_prompt(details: &PropertyDetails) -> String {
    let location = match details.building_name.as_deref().map(str::trim) {
        Some(building) if !building.is_empty() => format!("{}, {}", building, details.city),
        _ => details.city.clone(),
    };

    format!(
        "Act as a senior real estate appraiser in the Philippines.
Perform a valuation analysis for the following property:
- Type: {kind}
- Location: {location}
- Size: {size} sqm
- Bedrooms: {bedrooms}
- Bathrooms: {bathrooms}

Provide a realistic estimated market value range in Philippine Pesos (PHP).
Consider current market trends in the Philippines (e.g., POGO exodus effects, post-pandemic recovery, infrastructure projects like the Metro Manila Subway and MRT-7).

Also generate a hypothetical 5-year price trend history based on general area performance, oldest year first, ending with the current year.
Provide exactly 3 key highlights or factors affecting this specific valuation.",
        kind = details.property_type,
        location = location,
        size = details.size_sqm,
        bedrooms = details.bedrooms,
        bathrooms = details.bathrooms,
    )
}

pub fn market_trends_prompt(today: NaiveDate) -> String {
    let earliest = today - Duration::days(2);
    format!(
        "Today is {today}. Find the 7 most recent Philippine real estate news stories published between {earliest} and {today} (the last 24 to 48 hours).
Only use these sources: {sources}.
For each story give the headline as the title, a two to three sentence summary, the publisher as the source, and the article URL.
Use \"{today}\" as the digest date.",
        today = display_date(today),
        earliest = display_date(earliest),
        sources = NEWS_SOURCES.join(", "),
    )
}

pub fn heatmap_prompt(location: &str, today: NaiveDate) -> String {
    format!(
        "Act as a Philippine real estate market analyst.
Create a price heatmap for {location} as of {today}.
Break the area down into 6 to 9 well-known sub-areas, districts or barangays.
For each sub-area give the average residential price per square meter in PHP, a price level of exactly one of Budget, Mid-End, High-End or Luxury, a one-line description, and the year-on-year growth rate as a signed percentage (e.g. +4.5%).
Finish with a two sentence summary of the {location} market. Use \"{location}\" as the location and \"{today}\" as lastUpdated.",
        location = location,
        today = display_date(today),
    )
}
