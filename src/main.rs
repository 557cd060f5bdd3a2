mod composer;
mod config;
mod fallback;
mod llm;
mod models;
mod resolver;
mod validation;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use models::{
    format_php, format_php_compact, AppraisalResult, HeatmapData, MarketTrendsData,
    PropertyDetails, PropertyType, HEATMAP_LOCATIONS,
};
use resolver::Resolver;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use validation::Captcha;

const CAPTCHA_ATTEMPTS: usize = 3;

#[derive(Parser)]
#[command(name = "pinoy-appraiser", version, about = "AI-assisted Philippine property valuation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the market value of a property
    Appraise {
        #[arg(long)]
        city: String,
        /// Building or subdivision name
        #[arg(long)]
        building: Option<String>,
        /// e.g. "Condominium Unit", "house-and-lot", "vacant_lot"
        #[arg(long = "type", default_value = "Condominium Unit")]
        property_type: PropertyType,
        /// Floor or lot area in square meters
        #[arg(long)]
        size: f64,
        #[arg(long, default_value_t = 0)]
        bedrooms: u32,
        #[arg(long, default_value_t = 0)]
        bathrooms: u32,
        #[arg(long)]
        json: bool,
    },
    /// Today's real estate news digest
    Trends {
        #[arg(long)]
        json: bool,
    },
    /// Price per sqm by sub-area
    Heatmap {
        /// Locations to look up, in order (defaults to the first listed area)
        locations: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the areas offered for heatmaps
    Locations,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::init().context("Failed to load configuration")?;

    info!("🏠 Pinoy Appraiser");

    match cli.command {
        Command::Appraise {
            city,
            building,
            property_type,
            size,
            bedrooms,
            bathrooms,
            json,
        } => {
            let details = PropertyDetails {
                city,
                building_name: building,
                property_type,
                size_sqm: size,
                bedrooms,
                bathrooms,
            };
            confirm_human(&details).await?;

            let resolver = Resolver::from_config(&config)?;
            info!("Analyzing market data for {} in {}...", details.property_type, details.city);
            let result = resolver.request_appraisal(&details).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_appraisal(&details, &result);
            }
        }
        Command::Trends { json } => {
            let resolver = Resolver::from_config(&config)?;
            info!("Gathering latest real estate news...");
            let digest = resolver.request_market_trends().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
            } else {
                print_trends(&digest);
            }
        }
        Command::Heatmap { locations, json } => {
            let locations = if locations.is_empty() {
                vec![HEATMAP_LOCATIONS[0].to_string()]
            } else {
                locations
            };
            for location in &locations {
                validation::validate_location(location)?;
            }

            // One resolver for the whole run so repeats hit the session cache
            let resolver = Resolver::from_config(&config)?;
            let mut maps = Vec::with_capacity(locations.len());
            for location in &locations {
                info!("Analyzing {} market data...", location.trim());
                maps.push(resolver.request_heatmap(location).await);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&maps)?);
            } else {
                maps.iter().for_each(print_heatmap);
            }
        }
        Command::Locations => {
            for location in HEATMAP_LOCATIONS {
                println!("{}", location);
            }
        }
    }

    Ok(())
}

/// Field checks, then the arithmetic question on stdin. A wrong answer
/// gets a fresh question.
async fn confirm_human(details: &PropertyDetails) -> Result<()> {
    validation::validate_property_details(details)?;

    let mut captcha = Captcha::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stderr = tokio::io::stderr();

    for _ in 0..CAPTCHA_ATTEMPTS {
        stderr
            .write_all(format!("Security check: {} ", captcha.question()).as_bytes())
            .await?;
        stderr.flush().await?;

        let Some(answer) = lines.next_line().await? else {
            bail!("No answer given to the security check");
        };

        match validation::validate_submission(details, &captcha, &answer) {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!("{}", e);
                captcha.regenerate();
            }
        }
    }

    bail!("Security check failed {} times", CAPTCHA_ATTEMPTS)
}

fn print_appraisal(details: &PropertyDetails, result: &AppraisalResult) {
    println!();
    println!("{} · {} · {} sqm", details.property_type, details.city.trim(), details.size_sqm);
    if let Some(building) = details.building_name.as_deref().filter(|b| !b.trim().is_empty()) {
        println!("Building: {}", building.trim());
    }
    println!();
    println!(
        "Estimated value: {} - {}",
        format_php(result.min_price),
        format_php(result.max_price)
    );
    println!("Average:         {}", format_php(result.average_price));
    println!();
    println!("{}", result.analysis);
    println!();
    println!("Price trend:");
    for point in &result.price_trend {
        println!("  {}  {}", point.year, format_php_compact(point.price));
    }
    println!();
    println!("Key factors:");
    for (i, highlight) in result.comparable_highlights.iter().enumerate() {
        println!("  {}. {}", i + 1, highlight);
    }
    println!();
    println!("This is an automated estimate, not a formal appraisal.");
}

fn print_trends(digest: &MarketTrendsData) {
    println!();
    println!("Daily Market Trends · {}", digest.date);
    println!();
    for (i, item) in digest.items.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, item.source, item.title);
        println!("   {}", item.summary);
        println!("   {}", item.url);
        println!();
    }
    println!("Summarized by AI from public sources. Verify details with the original publishers.");
}

fn print_heatmap(map: &HeatmapData) {
    println!();
    println!("{} Heatmap · {}", map.location, map.last_updated);
    println!("{}", map.summary);
    println!();
    for zone in &map.zones {
        println!(
            "  {:<32} {:>9}/sqm  {:<9} {:>7}  {}",
            zone.area_name,
            format_php_compact(zone.avg_price_sqm),
            zone.price_level,
            zone.growth_rate,
            zone.description
        );
    }
    println!();
}
