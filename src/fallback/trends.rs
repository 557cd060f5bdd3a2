use crate::models::{display_date, MarketTrendsData, NewsItem};
use chrono::NaiveDate;

/// (title, summary, source, url)
const CURATED: [(&str, &str, &str, &str); 7] = [
    (
        "BSP holds policy rate steady as housing loan demand picks up",
        "The central bank kept its benchmark rate unchanged, giving banks room to keep mortgage rates stable. Lenders report a rise in home loan applications from first-time buyers in Metro Manila and nearby provinces.",
        "BusinessWorld",
        "https://www.bworldonline.com/banking-finance/",
    ),
    (
        "Metro Manila condo vacancies ease as developers slow new launches",
        "Property consultants note that unsold condominium inventory in Metro Manila is slowly being absorbed. Developers are shifting new launches toward horizontal projects in Cavite, Laguna and Pampanga.",
        "Philippine Daily Inquirer",
        "https://business.inquirer.net/category/property",
    ),
    (
        "Office space take-up rebounds on outsourcing and government leasing",
        "IT-BPM firms and government agencies drove office leasing in Makati, BGC and Quezon City this quarter. Analysts expect rents in prime buildings to hold while older stock continues to offer discounts.",
        "The Philippine Star",
        "https://www.philstar.com/business/real-estate",
    ),
    (
        "Metro Manila Subway progress lifts land values along the route",
        "Landowners near future subway stations in Valenzuela, Quezon City and Pasig are seeing stronger interest from developers. Brokers say transit-oriented projects command a premium over comparable sites.",
        "Manila Bulletin",
        "https://mb.com.ph/category/property",
    ),
    (
        "Leisure property sales climb in Batangas, Palawan and Siargao",
        "Demand for vacation homes and beach lots continues to grow as domestic tourism recovers. Developers are adding smaller lot cuts and flexible payment terms to reach younger buyers.",
        "BusinessMirror",
        "https://businessmirror.com.ph/category/property/",
    ),
    (
        "Pag-IBIG housing loan releases hit new high",
        "The state-run housing fund reported record loan releases for socialized and low-cost housing. Officials credit lower interest rates under the government's expanded housing program.",
        "Rappler",
        "https://www.rappler.com/business/",
    ),
    (
        "Online listing data shows rising searches for townhouses outside Metro Manila",
        "Search and inquiry data point to growing interest in townhouses and house-and-lot packages in Laguna, Cavite and Bulacan. Buyers cite more space and improved road links as key reasons.",
        "Lamudi Journal",
        "https://www.lamudi.com.ph/journal/",
    ),
];

/// Canned seven-story digest dated `today`
pub fn fallback_market_trends(today: NaiveDate) -> MarketTrendsData {
    MarketTrendsData {
        date: display_date(today),
        items: CURATED
            .iter()
            .map(|(title, summary, source, url)| NewsItem {
                title: title.to_string(),
                summary: summary.to_string(),
                source: source.to_string(),
                url: url.to_string(),
            })
            .collect(),
    }
}
