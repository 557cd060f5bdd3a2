//! Output schemas in the Gemini `responseSchema` dialect (OpenAPI subset).
//!
//! Each schema mirrors its result type in `crate::models` field for field.

use serde_json::{json, Value};

pub fn appraisal_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "minPrice": { "type": "NUMBER", "description": "Minimum estimated value in PHP" },
            "maxPrice": { "type": "NUMBER", "description": "Maximum estimated value in PHP" },
            "averagePrice": { "type": "NUMBER", "description": "Average estimated value in PHP" },
            "currency": { "type": "STRING", "description": "Always PHP" },
            "analysis": {
                "type": "STRING",
                "description": "A comprehensive market analysis paragraph (approx 100 words)."
            },
            "priceTrend": {
                "type": "ARRAY",
                "description": "5 year historical trend data, oldest year first",
                "minItems": 5,
                "maxItems": 5,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "year": { "type": "STRING" },
                        "price": { "type": "NUMBER" }
                    },
                    "required": ["year", "price"]
                }
            },
            "comparableHighlights": {
                "type": "ARRAY",
                "description": "List of 3 key factors influencing this price",
                "minItems": 3,
                "maxItems": 3,
                "items": { "type": "STRING" }
            }
        },
        "required": [
            "minPrice", "maxPrice", "averagePrice", "currency",
            "analysis", "priceTrend", "comparableHighlights"
        ]
    })
}

pub fn market_trends_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING", "description": "Digest date, e.g. October 18, 2026" },
            "items": {
                "type": "ARRAY",
                "description": "The 7 most recent real estate news items",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "summary": {
                            "type": "STRING",
                            "description": "Two to three sentence summary"
                        },
                        "source": { "type": "STRING", "description": "Publisher name" },
                        "url": { "type": "STRING", "description": "Link to the original article" }
                    },
                    "required": ["title", "summary", "source", "url"]
                }
            }
        },
        "required": ["date", "items"]
    })
}

pub fn heatmap_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "location": { "type": "STRING" },
            "lastUpdated": { "type": "STRING" },
            "summary": { "type": "STRING", "description": "Short overview of the local market" },
            "zones": {
                "type": "ARRAY",
                "description": "6 to 9 sub-areas of the location",
                "minItems": 6,
                "maxItems": 9,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "areaName": { "type": "STRING" },
                        "avgPriceSqm": {
                            "type": "NUMBER",
                            "description": "Average price per sqm in PHP"
                        },
                        "priceLevel": {
                            "type": "STRING",
                            "enum": ["Budget", "Mid-End", "High-End", "Luxury"]
                        },
                        "description": { "type": "STRING" },
                        "growthRate": {
                            "type": "STRING",
                            "description": "Year-on-year change, e.g. +5.2%"
                        }
                    },
                    "required": [
                        "areaName",
                        "avgPriceSqm",
                        "priceLevel",
                        "description",
                        "growthRate"
                    ]
                }
            }
        },
        "required": ["location", "lastUpdated", "zones", "summary"]
    })
}
