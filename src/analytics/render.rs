//! Terminal rendering of [`CampaignAnalytics`]

use std::fmt::Write;

use super::{CampaignAnalytics, RECENT_LIMIT};
use crate::models::EmailCampaignLog;
use crate::output::{format_timestamp, truncate};

const BAR_WIDTH: u64 = 40;

fn bar(value: u64, peak: u64, glyph: char) -> String {
    if peak == 0 || value == 0 {
        return String::new();
    }
    let width = ((value * BAR_WIDTH) as f64 / peak as f64).ceil() as usize;
    std::iter::repeat(glyph).take(width.max(1)).collect()
}

/// Full analytics page: cards, daily bars, breakdowns and recent campaigns
pub fn render(analytics: &CampaignAnalytics, logs: &[EmailCampaignLog]) -> String {
    let mut out = String::new();
    render_summary(&mut out, analytics);
    render_series(&mut out, analytics);
    render_templates(&mut out, analytics);
    render_statuses(&mut out, analytics);
    render_recent(&mut out, logs);
    out
}

pub fn render_summary(out: &mut String, analytics: &CampaignAnalytics) {
    let totals = &analytics.totals;
    let _ = writeln!(out, "Campaign Analytics");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "  Total Campaigns:      {}", analytics.campaign_count);
    let _ = writeln!(out, "  Emails Sent:          {}", totals.total);
    let _ = writeln!(out, "  Successful:           {}", totals.successful);
    let _ = writeln!(out, "  Failed:               {}", totals.failed);
    let _ = writeln!(out, "  Success Rate:         {}%", totals.success_rate());
    let _ = writeln!(
        out,
        "  Avg Emails/Campaign:  {}",
        analytics.average_emails_per_campaign
    );
    out.push('\n');
}

pub fn render_series(out: &mut String, analytics: &CampaignAnalytics) {
    let _ = writeln!(out, "Last 30 Days (successful █ / failed ░)");
    let _ = writeln!(out, "{}", "-".repeat(60));
    let peak = analytics.peak_day();
    for bucket in &analytics.time_series {
        let _ = writeln!(
            out,
            "  {} {:>3} {}{}",
            bucket.date.format("%b %d"),
            bucket.campaigns,
            bar(bucket.successful, peak, '█'),
            bar(bucket.failed, peak, '░')
        );
    }
    out.push('\n');
}

pub fn render_templates(out: &mut String, analytics: &CampaignAnalytics) {
    let _ = writeln!(out, "Template Performance");
    let _ = writeln!(
        out,
        "  {:<30} {:>9} {:>10} {:>8} {:>8} {:>6}",
        "Template", "Campaigns", "Successful", "Failed", "Total", "Rate"
    );
    let _ = writeln!(out, "  {}", "-".repeat(76));
    if analytics.templates.is_empty() {
        let _ = writeln!(out, "  No data");
    }
    for stats in &analytics.templates {
        let _ = writeln!(
            out,
            "  {:<30} {:>9} {:>10} {:>8} {:>8} {:>5}%",
            truncate(&stats.name, 30),
            stats.campaigns,
            stats.successful,
            stats.failed,
            stats.total,
            stats.success_rate()
        );
    }
    out.push('\n');
}

pub fn render_statuses(out: &mut String, analytics: &CampaignAnalytics) {
    let _ = writeln!(out, "Status Distribution");
    let _ = writeln!(out, "  {}", "-".repeat(30));
    if analytics.status_distribution.is_empty() {
        let _ = writeln!(out, "  No data");
    }
    for entry in &analytics.status_distribution {
        let _ = writeln!(
            out,
            "  {:<12} {:>5}",
            entry.status.as_str().to_uppercase(),
            entry.count
        );
    }
    out.push('\n');
}

pub fn render_recent(out: &mut String, logs: &[EmailCampaignLog]) {
    let _ = writeln!(out, "Recent Campaigns");
    let _ = writeln!(
        out,
        "  {:<24} {:<24} {:<11} {:>7} {:>7}  {}",
        "Template", "Domain", "Status", "Sent", "Failed", "Date"
    );
    let _ = writeln!(out, "  {}", "-".repeat(96));
    for log in super::recent(logs, RECENT_LIMIT) {
        let _ = writeln!(
            out,
            "  {:<24} {:<24} {:<11} {:>7} {:>7}  {}",
            truncate(&log.template_name, 24),
            truncate(&log.domain_name, 24),
            log.status.as_str().to_uppercase(),
            log.successful_emails,
            log.failed_emails,
            format_timestamp(&log.created_at)
        );
    }
}
