use crate::models::{AppraisalResult, PriceTrendPoint, PropertyDetails, PropertyType};
use chrono::{Datelike, NaiveDate};

/// Price per sqm (PHP) used when the city matches nothing below
pub const DEFAULT_RATE: f64 = 120_000.0;

/// Spread of the min/max range around the central value
pub const VARIANCE: f64 = 0.12;

/// Share of today's value for each of the last five years, oldest first
pub const TREND_RATIOS: [f64; 5] = [0.82, 0.86, 0.91, 0.96, 1.00];

/// Base price per sqm by city substring (lowercase). First match wins, so
/// more specific names come before ones that can appear alongside them.
const CITY_RATES: &[(&str, f64)] = &[
    ("makati", 250_000.0),
    ("bonifacio", 230_000.0),
    ("bgc", 230_000.0),
    ("taguig", 200_000.0),
    ("rockwell", 240_000.0),
    ("ortigas", 180_000.0),
    ("pasig", 170_000.0),
    ("mandaluyong", 170_000.0),
    ("san juan", 160_000.0),
    ("pasay", 170_000.0),
    ("quezon", 140_000.0),
    ("alabang", 160_000.0),
    ("muntinlupa", 150_000.0),
    ("paranaque", 140_000.0),
    ("parañaque", 140_000.0),
    ("cebu", 130_000.0),
    ("davao", 100_000.0),
    ("clark", 90_000.0),
    ("pampanga", 80_000.0),
    ("nuvali", 95_000.0),
    ("santa rosa", 85_000.0),
    ("sta. rosa", 85_000.0),
    ("tagaytay", 90_000.0),
    ("iloilo", 85_000.0),
    ("baguio", 100_000.0),
    ("palawan", 110_000.0),
    ("siargao", 115_000.0),
    ("boracay", 160_000.0),
    // Last: most Metro Manila addresses end in "Metro Manila"
    ("manila", 150_000.0),
];

/// Base rate for a city: case-insensitive substring match, else the default
pub fn city_rate(city: &str) -> f64 {
    let city = city.to_lowercase();
    CITY_RATES
        .iter()
        .find(|(needle, _)| city.contains(needle))
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_RATE)
}

pub fn type_factor(property_type: PropertyType) -> f64 {
    match property_type {
        PropertyType::HouseAndLot => 0.75,
        PropertyType::VacantLot => 0.60,
        PropertyType::CommercialSpace => 1.4,
        PropertyType::CondominiumUnit
        | PropertyType::Townhouse
        | PropertyType::BeachProperty => 1.0,
    }
}

/// Formula-based appraisal used when the model is unavailable.
///
/// Amounts are rounded to whole pesos. Trend years run from four years
/// before `today` up to `today`'s year.
pub fn fallback_appraisal(details: &PropertyDetails, today: NaiveDate) -> AppraisalResult {
    let rate = city_rate(&details.city) * type_factor(details.property_type);
    let total = (rate * details.size_sqm).round();
    let variance = (total * VARIANCE).round();

    let current_year = today.year();
    let price_trend = TREND_RATIOS
        .iter()
        .enumerate()
        .map(|(i, ratio)| PriceTrendPoint {
            year: (current_year - 4 + i as i32).to_string(),
            price: (total * ratio).round(),
        })
        .collect();

    let city = details.city.trim();
    let kind = details.property_type.label();

    AppraisalResult {
        min_price: total - variance,
        max_price: total + variance,
        average_price: total,
        currency: "PHP".to_string(),
        analysis: format!(
            "This estimate for a {size} sqm {kind} in {city} is based on typical asking prices of \
             around PHP {rate:.0} per square meter for comparable properties in the area. Values \
             across Philippine urban centers have climbed steadily over the last five years on the \
             back of new infrastructure and a recovering rental market, although oversupply in \
             some condominium segments has slowed appreciation. Actual transaction prices depend \
             on the exact building, floor level, view, finishing and title status, so treat this \
             range as a starting point and confirm it with a licensed appraiser or broker \
             before buying or selling.",
            size = details.size_sqm,
            kind = kind.to_lowercase(),
            city = city,
            rate = rate,
        ),
        price_trend,
        comparable_highlights: vec![
            format!(
                "Location premium: {} commands established demand from end-users and investors",
                city
            ),
            format!(
                "{} pricing reflects current supply in comparable developments nearby",
                kind
            ),
            "Upcoming transport and infrastructure projects support medium-term appreciation"
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn details(city: &str, property_type: PropertyType, size_sqm: f64) -> PropertyDetails {
        PropertyDetails {
            city: city.to_string(),
            building_name: None,
            property_type,
            size_sqm,
            bedrooms: 1,
            bathrooms: 1,
        }
    }

    #[test]
    fn makati_condo_example() {
        let makati = details("Makati", PropertyType::CondominiumUnit, 50.0);
        let result = fallback_appraisal(&makati, today());
        assert_eq!(result.average_price, 12_500_000.0);
        assert_eq!(result.min_price, 11_000_000.0);
        assert_eq!(result.max_price, 14_000_000.0);
        assert_eq!(result.currency, "PHP");
    }

    #[test]
    fn unknown_town_vacant_lot_uses_default_rate() {
        let result =
            fallback_appraisal(&details("Unknown Town", PropertyType::VacantLot, 100.0), today());
        assert_eq!(result.average_price, 7_200_000.0);
    }

    #[test]
    fn city_lookup_is_case_insensitive_substring() {
        assert_eq!(city_rate("Makati City"), 250_000.0);
        assert_eq!(city_rate("makati"), 250_000.0);
        assert_eq!(city_rate("Legaspi Village, MAKATI, Metro Manila"), 250_000.0);
        assert_eq!(city_rate("Unknown Town"), DEFAULT_RATE);
    }

    #[test]
    fn metro_manila_suffix_keeps_the_city_rate() {
        assert_eq!(city_rate("Quezon City, Metro Manila"), city_rate("Quezon City"));
        assert_eq!(city_rate("Quezon City, Metro Manila"), 140_000.0);
        assert_eq!(city_rate("Alabang, Muntinlupa, Metro Manila"), city_rate("Alabang"));
        assert_eq!(city_rate("Parañaque, Metro Manila"), city_rate("Parañaque"));
        assert_eq!(city_rate("Parañaque, Metro Manila"), 140_000.0);
        assert_eq!(city_rate("Manila Bay Area"), 150_000.0);
        assert_eq!(city_rate("Tondo, Manila"), 150_000.0);
    }

    #[test]
    fn type_factors() {
        assert_eq!(type_factor(PropertyType::HouseAndLot), 0.75);
        assert_eq!(type_factor(PropertyType::VacantLot), 0.60);
        assert_eq!(type_factor(PropertyType::CommercialSpace), 1.4);
        assert_eq!(type_factor(PropertyType::Townhouse), 1.0);
    }

    #[test]
    fn trend_ends_at_average_in_ascending_years() {
        let makati = details("Makati", PropertyType::CondominiumUnit, 50.0);
        let result = fallback_appraisal(&makati, today());
        let years: Vec<&str> = result.price_trend.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, ["2022", "2023", "2024", "2025", "2026"]);

        let prices: Vec<f64> = result.price_trend.iter().map(|p| p.price).collect();
        assert_eq!(
            prices,
            [10_250_000.0, 10_750_000.0, 11_375_000.0, 12_000_000.0, 12_500_000.0]
        );
        assert_eq!(result.comparable_highlights.len(), 3);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let d = details("Cebu City", PropertyType::HouseAndLot, 180.0);
        assert_eq!(fallback_appraisal(&d, today()), fallback_appraisal(&d, today()));
    }

    #[test]
    fn range_is_ordered_for_odd_sizes() {
        for size in [0.5, 1.0, 13.37, 999.9] {
            for kind in PropertyType::ALL {
                let r = fallback_appraisal(&details("Quezon City", kind, size), today());
                assert!(r.min_price <= r.average_price && r.average_price <= r.max_price);
            }
        }
    }
}
