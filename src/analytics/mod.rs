//! Campaign Analytics
//!
//! Pure aggregation over fetched email campaign logs: a 30-day series,
//! global totals, per-template and per-status breakdowns. Rendering lives in
//! [`render`] so the numbers can be reused for json/csv output.

mod aggregate;
pub mod render;

pub use aggregate::{
    recent, CampaignAnalytics, DailyBucket, StatusCount, TemplateStats, Totals, RECENT_LIMIT,
    WINDOW_DAYS,
};
