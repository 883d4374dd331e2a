use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{EmailCampaignLog, EmailStatus};
use crate::output::CsvRow;

/// Length of the daily series, today included
pub const WINDOW_DAYS: usize = 30;

/// Rows shown in the recent campaigns table
pub const RECENT_LIMIT: usize = 10;

/// Integer percentage, 0 when nothing was sent
fn percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub campaigns: u64,
    pub successful: u64,
    pub failed: u64,
}

impl DailyBucket {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            campaigns: 0,
            successful: 0,
            failed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub successful: u64,
    pub failed: u64,
    pub total: u64,
}

impl Totals {
    pub fn success_rate(&self) -> u64 {
        percent(self.successful, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateStats {
    pub name: String,
    pub campaigns: u64,
    pub successful: u64,
    pub failed: u64,
    /// Sum of `total_emails`
    pub total: u64,
}

impl TemplateStats {
    pub fn success_rate(&self) -> u64 {
        percent(self.successful, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: EmailStatus,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignAnalytics {
    pub time_series: Vec<DailyBucket>,
    pub totals: Totals,
    pub templates: Vec<TemplateStats>,
    pub status_distribution: Vec<StatusCount>,
    pub campaign_count: u64,
    pub average_emails_per_campaign: u64,
}

impl CampaignAnalytics {
    /// Aggregate `logs` for a window ending on `today`
    ///
    /// A log lands in a day bucket when the UTC calendar date of its
    /// `created_at` equals the bucket date. Logs outside the window still
    /// count towards every other figure.
    pub fn compute(logs: &[EmailCampaignLog], today: NaiveDate) -> Self {
        let first_day = today - Duration::days(WINDOW_DAYS as i64 - 1);
        let mut time_series: Vec<DailyBucket> = (0..WINDOW_DAYS as i64)
            .map(|offset| DailyBucket::empty(first_day + Duration::days(offset)))
            .collect();

        let mut totals = Totals::default();
        let mut templates: Vec<TemplateStats> = Vec::new();
        let mut status_distribution: Vec<StatusCount> = Vec::new();
        let mut emails_sent: u64 = 0;

        for log in logs {
            let day = log.created_at.date_naive();
            if day >= first_day && day <= today {
                let bucket = &mut time_series[(day - first_day).num_days() as usize];
                bucket.campaigns += 1;
                bucket.successful += log.successful_emails;
                bucket.failed += log.failed_emails;
            }

            totals.successful += log.successful_emails;
            totals.failed += log.failed_emails;
            emails_sent += log.total_emails;

            match templates.iter_mut().find(|t| t.name == log.template_name) {
                Some(stats) => {
                    stats.campaigns += 1;
                    stats.successful += log.successful_emails;
                    stats.failed += log.failed_emails;
                    stats.total += log.total_emails;
                }
                None => templates.push(TemplateStats {
                    name: log.template_name.clone(),
                    campaigns: 1,
                    successful: log.successful_emails,
                    failed: log.failed_emails,
                    total: log.total_emails,
                }),
            }

            match status_distribution.iter_mut().find(|s| s.status == log.status) {
                Some(entry) => entry.count += 1,
                None => status_distribution.push(StatusCount {
                    status: log.status.clone(),
                    count: 1,
                }),
            }
        }
        totals.total = totals.successful + totals.failed;

        let campaign_count = logs.len() as u64;
        let average_emails_per_campaign = if campaign_count == 0 {
            0
        } else {
            (emails_sent as f64 / campaign_count as f64).round() as u64
        };

        Self {
            time_series,
            totals,
            templates,
            status_distribution,
            campaign_count,
            average_emails_per_campaign,
        }
    }

    /// Largest daily `successful + failed`, used to scale bars
    pub fn peak_day(&self) -> u64 {
        self.time_series
            .iter()
            .map(|b| b.successful + b.failed)
            .max()
            .unwrap_or(0)
    }
}

/// The first `limit` logs in backend order (newest first)
pub fn recent(logs: &[EmailCampaignLog], limit: usize) -> &[EmailCampaignLog] {
    &logs[..logs.len().min(limit)]
}

impl CsvRow for DailyBucket {
    fn headers() -> &'static [&'static str] {
        &["date", "campaigns", "successful", "failed"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.campaigns.to_string(),
            self.successful.to_string(),
            self.failed.to_string(),
        ]
    }
}
