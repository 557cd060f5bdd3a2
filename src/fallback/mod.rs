//! Deterministic stand-ins for each query kind. Pure, no I/O.

pub mod appraisal;
pub mod heatmap;
pub mod trends;

pub use appraisal::fallback_appraisal;
pub use heatmap::fallback_heatmap;
pub use trends::fallback_market_trends;
