//! # Campaign Desk
//!
//! Terminal front-end for a marketing campaign backend: send template email
//! campaigns, schedule WhatsApp template messages, manage scheduled sends and
//! review delivery analytics.
//!
//! ## Modules
//!
//! - [`api`]: REST client for the campaign backend
//! - [`forms`]: Email and WhatsApp submission forms, schedule policies
//! - [`logs`]: Campaign log tables with per-row actions
//! - [`analytics`]: 30-day series, totals and breakdowns over email logs
//! - [`shell`]: Section navigation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use campaign_desk::{BackendClient, CampaignAnalytics, CampaignApi, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = BackendClient::new(&config.backend)?;
//!
//!     let logs = client.email_logs().await?;
//!     let analytics = CampaignAnalytics::compute(&logs, chrono::Utc::now().date_naive());
//!
//!     println!("Success rate: {}%", analytics.totals.success_rate());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod forms;
pub mod logging;
pub mod logs;
pub mod models;
pub mod notify;
pub mod output;
pub mod shell;

// Re-export top-level types for convenience
pub use analytics::{CampaignAnalytics, DailyBucket, TemplateStats, Totals};

pub use api::{ApiError, ApiResult, BackendClient, CampaignApi, FollowUp};

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, WhatsAppConfig};

pub use forms::{EmailForm, FormError, SchedulePolicy, TripleSchedule, WhatsAppForm};

pub use logs::{EmailLogTable, RowAction, WhatsAppLogTable};

pub use models::{
    CampaignId, EmailCampaignLog, EmailStatus, TemplateParameter, WhatsAppCampaignLog,
    WhatsAppContact, WhatsAppStatus, WhatsAppTemplate,
};

pub use notify::{Level, Notification, Toasts};

pub use output::OutputFormat;

pub use shell::{MountedSection, Section};
