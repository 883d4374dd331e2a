//! Benchmarks for campaign analytics
//!
//! Run with: cargo bench

use campaign_desk::analytics::{render, CampaignAnalytics};
use campaign_desk::{EmailCampaignLog, EmailStatus};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const TEMPLATES: [&str; 5] = ["welcome", "promo", "renewal", "digest", "winback"];

fn create_test_logs(count: usize) -> Vec<EmailCampaignLog> {
    let newest = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let failed = (i % 7) as u64;
            let successful = 50 - failed;
            EmailCampaignLog {
                id: i as i64,
                domain_name: "example.com".to_string(),
                template_name: TEMPLATES[i % TEMPLATES.len()].to_string(),
                template_id: format!("d-{}", i % TEMPLATES.len()),
                recipients: None,
                status: if failed == 0 {
                    EmailStatus::Success
                } else {
                    EmailStatus::Partial
                },
                total_emails: successful + failed,
                successful_emails: successful,
                failed_emails: failed,
                deliverable_emails: None,
                undeliverable_emails: None,
                error_message: None,
                // Spread over ~60 days so half fall outside the window
                created_at: newest - Duration::hours((i % 1440) as i64),
                updated_at: None,
            }
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

    for size in [100, 1000, 10000] {
        let logs = create_test_logs(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("compute_{}", size), |b| {
            b.iter(|| CampaignAnalytics::compute(black_box(&logs), today))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let logs = create_test_logs(1000);
    let analytics = CampaignAnalytics::compute(&logs, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());

    group.bench_function("render_1000", |b| {
        b.iter(|| render::render(black_box(&analytics), black_box(&logs)))
    });

    group.finish();
}

criterion_group!(benches, bench_compute, bench_render);
criterion_main!(benches);
