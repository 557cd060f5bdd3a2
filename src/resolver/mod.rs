//! Response Resolver: one model call per request, decoded into the expected
//! shape, with deterministic fallback data on any failure. Callers always
//! get a value back.

pub mod decode;

use crate::composer::{self, QueryKind};
use crate::config::Config;
use crate::fallback;
use crate::llm::{GeminiClient, GenerateRequest, ModelClient};
use crate::models::{AppraisalResult, HeatmapData, MarketTrendsData, PropertyDetails};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use decode::DecodeError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct Resolver {
    client: Option<Arc<dyn ModelClient>>,
    fallback_delay: Duration,
    today: fn() -> NaiveDate,
    /// Heatmaps served or in flight this session, by trimmed location
    heatmap_cache: Mutex<HashMap<String, Arc<OnceCell<HeatmapData>>>>,
}

impl Resolver {
    /// `client: None` means no credential is configured; every request is
    /// then answered locally after `fallback_delay`.
    pub fn new(client: Option<Arc<dyn ModelClient>>, fallback_delay: Duration) -> Self {
        Self {
            client,
            fallback_delay,
            today: local_today,
            heatmap_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Build the Gemini-backed resolver described by the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let client: Option<Arc<dyn ModelClient>> = match &config.api_key {
            Some(key) => {
                info!("Using model {} at {}", config.model, config.base_url);
                Some(Arc::new(GeminiClient::new(key.clone(), config)?))
            }
            None => {
                info!("No API key configured, serving offline estimates only");
                None
            }
        };
        Ok(Self::new(client, config.fallback_delay))
    }

    #[cfg(test)]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn request_appraisal(&self, details: &PropertyDetails) -> AppraisalResult {
        let today = (self.today)();
        let request = composer::compose_appraisal(details);

        match self.call(QueryKind::Appraisal, &request, decode::decode_appraisal).await {
            Some(result) => result,
            None => fallback::fallback_appraisal(details, today),
        }
    }

    pub async fn request_market_trends(&self) -> MarketTrendsData {
        let today = (self.today)();
        let request = composer::compose_market_trends(today);

        match self.call(QueryKind::MarketTrends, &request, decode::decode_market_trends).await {
            Some(digest) => digest,
            None => fallback::fallback_market_trends(today),
        }
    }

    /// Served from the session cache when this location was already fetched.
    /// Concurrent requests for one location wait on a single fetch.
    pub async fn request_heatmap(&self, location: &str) -> HeatmapData {
        let key = location.trim().to_string();
        let cell = self
            .heatmap_cache
            .lock()
            .await
            .entry(key.clone())
            .or_default()
            .clone();

        if let Some(cached) = cell.get() {
            debug!("Heatmap for {} served from session cache", key);
            return cached.clone();
        }

        cell.get_or_init(|| self.fetch_heatmap(&key)).await.clone()
    }

    async fn fetch_heatmap(&self, location: &str) -> HeatmapData {
        let today = (self.today)();
        let request = composer::compose_heatmap(location, today);

        match self.call(QueryKind::Heatmap, &request, decode::decode_heatmap).await {
            Some(map) => map,
            None => fallback::fallback_heatmap(location, today),
        }
    }

    /// Run one model call. `None` means the caller should fall back.
    async fn call<T>(
        &self,
        kind: QueryKind,
        request: &GenerateRequest,
        decode: fn(&str) -> Result<T, DecodeError>,
    ) -> Option<T> {
        let Some(client) = &self.client else {
            if !self.fallback_delay.is_zero() {
                tokio::time::sleep(self.fallback_delay).await;
            }
            info!("Serving offline {} estimate", kind);
            return None;
        };

        let text = match client.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{} {} request failed: {}", client.backend_name(), kind, e);
                info!("Falling back to offline {} estimate", kind);
                return None;
            }
        };

        match decode(&text) {
            Ok(value) => {
                info!("✅ {} answered by {}", kind, client.backend_name());
                Some(value)
            }
            Err(e) => {
                warn!("Unusable {} response from {}: {}", kind, client.backend_name(), e);
                debug!("Raw response: {}", text);
                info!("Falling back to offline {} estimate", kind);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockClient;
    use crate::models::{PriceLevel, PropertyType};
    use serde_json::json;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn offline() -> Resolver {
        Resolver::new(None, Duration::ZERO).with_clock(fixed_today)
    }

    fn online(mock: &Arc<MockClient>) -> Resolver {
        let client: Arc<dyn ModelClient> = mock.clone();
        Resolver::new(Some(client), Duration::ZERO).with_clock(fixed_today)
    }

    fn makati_condo() -> PropertyDetails {
        PropertyDetails {
            city: "Makati".to_string(),
            building_name: None,
            property_type: PropertyType::CondominiumUnit,
            size_sqm: 50.0,
            bedrooms: 1,
            bathrooms: 1,
        }
    }

    fn model_appraisal() -> String {
        json!({
            "minPrice": 9000000,
            "maxPrice": 11000000,
            "averagePrice": 10000000,
            "currency": "PHP",
            "analysis": "Demand remains firm.",
            "priceTrend": [
                { "year": "2022", "price": 8000000 },
                { "year": "2023", "price": 8500000 },
                { "year": "2024", "price": 9000000 },
                { "year": "2025", "price": 9600000 },
                { "year": "2026", "price": 10000000 }
            ],
            "comparableHighlights": ["Near Ayala Triangle", "Older building", "Strong rental yield"]
        })
        .to_string()
    }

    fn model_heatmap(location: &str) -> String {
        json!({
            "location": location,
            "lastUpdated": "October 18, 2026",
            "summary": "Prices are steady.",
            "zones": [{
                "areaName": "General Luna",
                "avgPriceSqm": 150000,
                "priceLevel": "Luxury",
                "description": "Surf town center",
                "growthRate": "+8.0%"
            }]
        })
        .to_string()
    }

    fn assert_appraisal_shape(result: &AppraisalResult) {
        assert!(result.min_price <= result.average_price);
        assert!(result.average_price <= result.max_price);
        assert_eq!(result.currency, "PHP");
        assert_eq!(result.price_trend.len(), 5);
        assert_eq!(result.comparable_highlights.len(), 3);
    }

    #[tokio::test]
    async fn offline_mode_resolves_every_kind() {
        let resolver = offline();

        let appraisal = resolver.request_appraisal(&makati_condo()).await;
        assert_appraisal_shape(&appraisal);
        assert_eq!(appraisal.min_price, 11_000_000.0);
        assert_eq!(appraisal.max_price, 14_000_000.0);
        assert_eq!(appraisal.average_price, 12_500_000.0);

        let digest = resolver.request_market_trends().await;
        assert_eq!(digest.date, "October 18, 2026");
        assert_eq!(digest.items.len(), 7);

        let map = resolver.request_heatmap("Cebu City").await;
        assert_eq!(map.location, "Cebu City");
        assert_eq!(map.zones.len(), 6);
    }

    #[tokio::test]
    async fn offline_appraisal_is_deterministic() {
        let resolver = offline();
        let first = resolver.request_appraisal(&makati_condo()).await;
        let second = resolver.request_appraisal(&makati_condo()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn model_answer_is_returned_when_well_formed() {
        let mock = Arc::new(MockClient::replying(model_appraisal()));
        let result = online(&mock).request_appraisal(&makati_condo()).await;

        assert_eq!(mock.calls(), 1);
        assert_eq!(result.average_price, 10_000_000.0);
        assert_eq!(result.comparable_highlights[0], "Near Ayala Triangle");
        assert_appraisal_shape(&result);

        let sent = mock.last_request().unwrap();
        assert!(sent.prompt.contains("- Location: Makati"));
        assert!(sent.response_schema.is_some());
    }

    #[tokio::test]
    async fn failures_fall_back_to_the_formula() {
        let expected = fallback::fallback_appraisal(&makati_condo(), fixed_today());

        for mock in [
            MockClient::failing(503),
            MockClient::empty(),
            MockClient::replying("I think it's worth about 12M pesos."),
            MockClient::replying(model_appraisal().replace("\"PHP\"", "\"USD\"")),
        ] {
            let mock = Arc::new(mock);
            let result = online(&mock).request_appraisal(&makati_condo()).await;
            assert_eq!(mock.calls(), 1, "exactly one attempt, no retries");
            assert_eq!(result, expected);
        }
    }

    #[tokio::test]
    async fn untrusted_price_order_is_replaced() {
        let inverted = model_appraisal().replace("\"minPrice\":9000000", "\"minPrice\":19000000");
        let mock = Arc::new(MockClient::replying(inverted));
        let result = online(&mock).request_appraisal(&makati_condo()).await;
        assert_appraisal_shape(&result);
        assert_eq!(result.average_price, 12_500_000.0);
    }

    #[tokio::test]
    async fn trends_request_is_grounded_and_accepts_fenced_json() {
        let body = json!({
            "date": "October 18, 2026",
            "items": [{
                "title": "Rates hold",
                "summary": "BSP keeps rates.",
                "source": "BusinessWorld",
                "url": "https://www.bworldonline.com/"
            }]
        });
        let mock = Arc::new(MockClient::replying(format!("```json\n{}\n```", body)));
        let digest = online(&mock).request_market_trends().await;

        assert_eq!(digest.items.len(), 1);
        assert_eq!(digest.items[0].title, "Rates hold");
        assert!(mock.last_request().unwrap().grounded);
    }

    #[tokio::test]
    async fn heatmap_is_cached_per_location() {
        let mock = Arc::new(MockClient::replying(model_heatmap("Siargao")));
        let resolver = online(&mock);

        let first = resolver.request_heatmap("Siargao").await;
        let second = resolver.request_heatmap(" Siargao ").await;
        assert_eq!(mock.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.zones[0].price_level, PriceLevel::Luxury);

        resolver.request_heatmap("Palawan").await;
        assert_eq!(mock.calls(), 2);
        resolver.request_heatmap("Palawan").await;
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn fallback_heatmaps_are_cached_too() {
        let mock = Arc::new(MockClient::failing(429));
        let resolver = online(&mock);

        let first = resolver.request_heatmap("Alabang").await;
        let second = resolver.request_heatmap("Alabang").await;
        assert_eq!(mock.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.zones.len(), 6);
    }

    #[tokio::test]
    async fn concurrent_requests_for_one_location_share_a_call() {
        let mock = Arc::new(
            MockClient::replying(model_heatmap("Siargao")).delayed(Duration::from_millis(20)),
        );
        let resolver = online(&mock);

        let (first, second) = tokio::join!(
            resolver.request_heatmap("Siargao"),
            resolver.request_heatmap("Siargao "),
        );
        assert_eq!(mock.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn offline_mode_waits_the_configured_delay() {
        let resolver = Resolver::new(None, Duration::from_millis(50)).with_clock(fixed_today);
        let started = std::time::Instant::now();
        resolver.request_market_trends().await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn from_config_without_key_is_offline() {
        let resolver = Resolver::from_config(&Config::default()).unwrap();
        assert!(resolver.client.is_none());

        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let resolver = Resolver::from_config(&config).unwrap();
        assert_eq!(resolver.client.as_ref().unwrap().backend_name(), "Gemini");
    }
}
