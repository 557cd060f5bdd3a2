//! Typed decoders for model output. Anything off-shape is rejected so the
//! caller can substitute fallback data.

use crate::models::{AppraisalResult, HeatmapData, MarketTrendsData, PriceTrendPoint};
use serde::de::DeserializeOwned;
use std::cmp::Ordering;

pub const TREND_POINTS: usize = 5;
pub const HIGHLIGHTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("not valid JSON for this shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error("price {0} is not a finite non-negative number")]
    BadPrice(f64),
    #[error("prices out of order: min {min}, average {average}, max {max}")]
    PriceOrder { min: f64, average: f64, max: f64 },
    #[error("currency must be PHP, got {0}")]
    Currency(String),
    #[error("expected {expected} trend points, got {got}")]
    TrendLength { expected: usize, got: usize },
    #[error("trend years not ascending at {0}")]
    TrendOrder(String),
    #[error("expected {expected} highlights, got {got}")]
    HighlightCount { expected: usize, got: usize },
    #[error("digest has no news items")]
    NoItems,
    #[error("heatmap has no zones")]
    NoZones,
}

/// Drop a surrounding markdown code fence (```json ... ```), if any
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}

fn check_price(price: f64) -> Result<(), DecodeError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(DecodeError::BadPrice(price))
    }
}

fn compare_years(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn check_trend(trend: &[PriceTrendPoint]) -> Result<(), DecodeError> {
    if trend.len() != TREND_POINTS {
        return Err(DecodeError::TrendLength {
            expected: TREND_POINTS,
            got: trend.len(),
        });
    }
    for pair in trend.windows(2) {
        if compare_years(&pair[0].year, &pair[1].year) != Ordering::Less {
            return Err(DecodeError::TrendOrder(pair[1].year.clone()));
        }
    }
    trend.iter().try_for_each(|p| check_price(p.price))
}

pub fn decode_appraisal(text: &str) -> Result<AppraisalResult, DecodeError> {
    let mut result: AppraisalResult = parse(text)?;

    for price in [result.min_price, result.average_price, result.max_price] {
        check_price(price)?;
    }
    if !(result.min_price <= result.average_price && result.average_price <= result.max_price) {
        return Err(DecodeError::PriceOrder {
            min: result.min_price,
            average: result.average_price,
            max: result.max_price,
        });
    }

    if !result.currency.trim().eq_ignore_ascii_case("PHP") {
        return Err(DecodeError::Currency(result.currency));
    }
    result.currency = "PHP".to_string();

    check_trend(&result.price_trend)?;

    if result.comparable_highlights.len() != HIGHLIGHTS {
        return Err(DecodeError::HighlightCount {
            expected: HIGHLIGHTS,
            got: result.comparable_highlights.len(),
        });
    }

    Ok(result)
}

pub fn decode_market_trends(text: &str) -> Result<MarketTrendsData, DecodeError> {
    let digest: MarketTrendsData = parse(text)?;
    if digest.items.is_empty() {
        return Err(DecodeError::NoItems);
    }
    Ok(digest)
}

pub fn decode_heatmap(text: &str) -> Result<HeatmapData, DecodeError> {
    let map: HeatmapData = parse(text)?;
    if map.zones.is_empty() {
        return Err(DecodeError::NoZones);
    }
    map.zones.iter().try_for_each(|z| check_price(z.avg_price_sqm))?;
    Ok(map)
}
