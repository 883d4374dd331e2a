//! Navigation Shell
//!
//! The dashboard has four sections. Mounting a section performs its fetches
//! and renders it; every failure ends up as a notification, never an error.

use chrono::NaiveDate;
use futures_util::future::join3;
use std::fmt::Write;

use crate::analytics::{self, CampaignAnalytics};
use crate::api::CampaignApi;
use crate::config::Config;
use crate::forms::WhatsAppForm;
use crate::logs::{EmailLogTable, WhatsAppLogTable};
use crate::notify::{Notification, Toasts};
use crate::output::truncate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Emails,
    WhatsApp,
    Analytics,
}

impl Section {
    pub fn all() -> [Section; 4] {
        [
            Section::Dashboard,
            Section::Emails,
            Section::WhatsApp,
            Section::Analytics,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Emails => "emails",
            Section::WhatsApp => "whatsapp",
            Section::Analytics => "analytics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Emails => "Email Campaigns",
            Section::WhatsApp => "WhatsApp Campaigns",
            Section::Analytics => "Analytics",
        }
    }

    fn blurb(&self) -> &'static str {
        match self {
            Section::Dashboard => "Overview and navigation",
            Section::Emails => "Send email campaigns and review their logs",
            Section::WhatsApp => "Schedule WhatsApp templates and manage sends",
            Section::Analytics => "Delivery trends for the last 30 days",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::all()
            .into_iter()
            .find(|section| section.id() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown section: {}. Use: dashboard, emails, whatsapp, analytics",
                    s
                )
            })
    }
}

/// A rendered section and the notifications raised while mounting it
#[derive(Debug)]
pub struct MountedSection {
    pub section: Section,
    pub body: String,
    pub toasts: Toasts,
}

/// Sidebar menu with the active section marked
pub fn render_menu(active: Section) -> String {
    let mut out = String::new();
    for section in Section::all() {
        let marker = if section == active { ">" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<10} {:<20} {}",
            marker,
            section.id(),
            section.title(),
            section.blurb()
        );
    }
    out
}

/// Fetch and render one section
pub async fn mount(
    section: Section,
    api: &dyn CampaignApi,
    config: &Config,
    today: NaiveDate,
) -> MountedSection {
    tracing::debug!(section = section.id(), "Mounting section");
    let mut toasts = Toasts::new();
    let mut body = String::new();
    let _ = writeln!(body, "{}", section.title());
    let _ = writeln!(body, "{}", "=".repeat(section.title().len()));
    body.push('\n');

    match section {
        Section::Dashboard => {
            body.push_str("Welcome to the Campaign Dashboard.\n");
            body.push_str("Pick a section to send campaigns or review their results.\n\n");
            body.push_str(&render_menu(section));
        }
        Section::Emails => {
            let mut table = EmailLogTable::new();
            table.refresh(api, &mut toasts).await;
            body.push_str(&table.render());
        }
        Section::WhatsApp => mount_whatsapp(&mut body, &mut toasts, api, config).await,
        Section::Analytics => match api.email_logs().await {
            Ok(logs) => {
                let computed = CampaignAnalytics::compute(&logs, today);
                body.push_str(&analytics::render::render(&computed, &logs));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch analytics data");
                toasts.push(Notification::error("Failed to fetch analytics data"));
            }
        },
    }

    MountedSection {
        section,
        body,
        toasts,
    }
}

async fn mount_whatsapp(
    body: &mut String,
    toasts: &mut Toasts,
    api: &dyn CampaignApi,
    config: &Config,
) {
    let mut form = WhatsAppForm::new(config.whatsapp.clone());
    let mut table = WhatsAppLogTable::new(config.whatsapp.clone());

    let (templates, contacts, refreshed) = join3(
        api.whatsapp_templates(),
        api.whatsapp_contacts(),
        table.refresh(api, &mut *toasts),
    )
    .await;

    match templates {
        Ok(templates) => form.load_templates(templates),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch WhatsApp templates");
            toasts.push(Notification::error("Failed to fetch WhatsApp templates"));
        }
    }
    match contacts {
        Ok(contacts) => form.load_contacts(contacts),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch WhatsApp contacts");
            toasts.push(Notification::error("Failed to fetch WhatsApp contacts"));
        }
    }
    tracing::debug!(
        templates = form.templates().len(),
        contacts = form.contacts().len(),
        logs_loaded = refreshed,
        "WhatsApp section loaded"
    );

    let _ = writeln!(body, "Templates ({})", form.templates().len());
    for template in form.templates() {
        let marker = if template.name == form.template_name { "*" } else { " " };
        let _ = writeln!(body, "  {} {:<30} {}", marker, truncate(&template.name, 30), template.id);
    }
    body.push('\n');

    let _ = writeln!(body, "Contacts ({})", form.contacts().len());
    for contact in form.contacts() {
        let _ = writeln!(body, "    {:<30} {}", truncate(&contact.name, 30), contact.phone);
    }
    body.push('\n');

    let _ = writeln!(body, "Campaign Logs");
    body.push_str(&table.render());
}
