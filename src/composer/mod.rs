//! Request Composer: one prompt template and one output schema per query kind.

pub mod prompts;
pub mod schema;

use crate::llm::GenerateRequest;
use crate::models::PropertyDetails;
use chrono::NaiveDate;
use std::fmt;

/// The three things the model can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Appraisal,
    MarketTrends,
    Heatmap,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Appraisal => "appraisal",
            QueryKind::MarketTrends => "market-trends",
            QueryKind::Heatmap => "heatmap",
        };
        f.write_str(name)
    }
}

pub fn compose_appraisal(details: &PropertyDetails) -> GenerateRequest {
    GenerateRequest::new(prompts::appraisal_prompt(details)).with_schema(schema::appraisal_schema())
}

/// News must be current, so this is the one grounded query
pub fn compose_market_trends(today: NaiveDate) -> GenerateRequest {
    GenerateRequest::new(prompts::market_trends_prompt(today))
        .with_schema(schema::market_trends_schema())
        .with_grounding()
}

pub fn compose_heatmap(location: &str, today: NaiveDate) -> GenerateRequest {
    GenerateRequest::new(prompts::heatmap_prompt(location, today))
        .with_schema(schema::heatmap_schema())
}
