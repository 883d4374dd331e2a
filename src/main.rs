//! Campaign Desk CLI
//!
//! Command-line interface for the campaign backend:
//! - Open dashboard sections
//! - Send and preview email campaigns
//! - Schedule WhatsApp templates and manage scheduled sends
//! - Show campaign analytics

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use campaign_desk::analytics::{self, CampaignAnalytics};
use campaign_desk::api::FollowUp;
use campaign_desk::config::{generate_default_config, Config};
use campaign_desk::output::{to_csv, to_json, CsvRow, OutputFormat};
use campaign_desk::shell::{self, Section};
use campaign_desk::{
    BackendClient, CampaignApi, CampaignId, EmailForm, EmailLogTable, Notification, RowAction,
    Toasts, WhatsAppForm, WhatsAppLogTable,
};

#[derive(Parser)]
#[command(name = "campaign-desk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send and track email and WhatsApp marketing campaigns")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and CAMPAIGN_DESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Config file (default: user config dir, then ./campaign-desk.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard home and the section menu
    Dashboard,

    /// Open a section (dashboard, emails, whatsapp, analytics)
    Open {
        section: Section,
    },

    /// Email campaigns
    #[command(subcommand)]
    Email(EmailCommands),

    /// WhatsApp campaigns
    #[command(subcommand)]
    Whatsapp(WhatsAppCommands),

    /// Campaign analytics for the last 30 days
    Analytics,

    /// Print a default config file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct EmailFields {
    /// Sending domain
    #[arg(long)]
    pub domain: String,
    /// Template name
    #[arg(long)]
    pub template_name: String,
    /// Provider template id
    #[arg(long)]
    pub template_id: String,
}

#[derive(Subcommand)]
pub enum EmailCommands {
    /// Send a template email campaign
    Send {
        #[command(flatten)]
        fields: EmailFields,
        /// Comma-separated recipient addresses
        #[arg(short, long)]
        recipients: String,
    },

    /// Check what one recipient would receive, without sending
    Preview {
        #[command(flatten)]
        fields: EmailFields,
        /// Recipient address
        #[arg(short, long)]
        recipient: String,
    },

    /// List email campaign logs
    Logs {
        /// Show deliverable/undeliverable lists for every row
        #[arg(short, long)]
        expand: bool,
    },
}

#[derive(Subcommand)]
pub enum WhatsAppCommands {
    /// List approved templates
    Templates,

    /// List provider contacts
    Contacts,

    /// Send or schedule a template message
    Send {
        /// Template name (default: first approved template)
        #[arg(short, long)]
        template: Option<String>,
        /// Contact phone to include (repeatable)
        #[arg(short, long)]
        contact: Vec<String>,
        /// Include every provider contact
        #[arg(long)]
        all_contacts: bool,
        /// Extra phone number typed by hand
        #[arg(short, long)]
        number: Option<String>,
        /// When to send: "now", "+2h", "+7d", RFC 3339 or "YYYY-MM-DD HH:MM" local time
        #[arg(long, default_value = "now")]
        at: String,
        /// Value for template placeholder {{2}}
        #[arg(long)]
        param_one: Option<String>,
        /// Value for template placeholder {{3}}
        #[arg(long)]
        param_two: Option<String>,
        /// Print the planned sends without contacting the backend
        #[arg(long)]
        dry_run: bool,
    },

    /// List WhatsApp campaign logs
    Logs {
        /// Show details and available actions for every row
        #[arg(short, long)]
        expand: bool,
    },

    /// Send a scheduled message immediately
    SendNow { id: CampaignId },

    /// Remove a scheduled message from the schedule
    Cancel {
        id: CampaignId,
        /// Reason stored with the cancellation
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Send the second or third payment reminder now
    Followup { id: CampaignId, which: FollowUp },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.backend.base_url = url.clone();
    }

    campaign_desk::logging::init_tracing(&config.logging);

    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;

    let client = BackendClient::new(&config.backend)?;
    tracing::debug!(base_url = client.base_url(), "Using campaign backend");

    let mut toasts = Toasts::new();

    match cli.command {
        Commands::Dashboard => {
            open_section(Section::Dashboard, &client, &config, &mut toasts).await;
        }

        Commands::Open { section } => {
            open_section(section, &client, &config, &mut toasts).await;
        }

        Commands::Email(command) => run_email(command, &client, format, &mut toasts).await?,

        Commands::Whatsapp(command) => {
            run_whatsapp(command, &client, &config, format, &mut toasts).await?
        }

        Commands::Analytics => match client.email_logs().await {
            Ok(logs) => {
                let computed = CampaignAnalytics::compute(&logs, Utc::now().date_naive());
                match format {
                    OutputFormat::Json => println!("{}", to_json(&computed)?),
                    OutputFormat::Csv => print!("{}", to_csv(&computed.time_series)?),
                    OutputFormat::Table => print!("{}", analytics::render::render(&computed, &logs)),
                }
            }
            Err(e) => toasts.push(Notification::from_api_error(
                &e,
                "Failed to fetch analytics data",
            )),
        },

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write config to {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    let failed = toasts.iter().last().map(Notification::is_error).unwrap_or(false);
    toasts.flush_to_terminal();
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

async fn open_section(section: Section, api: &dyn CampaignApi, config: &Config, toasts: &mut Toasts) {
    let mounted = shell::mount(section, api, config, Utc::now().date_naive()).await;
    print!("{}", mounted.body);
    toasts.extend(mounted.toasts);
}

fn print_rows<R: CsvRow + serde::Serialize>(
    rows: &[R],
    format: OutputFormat,
    table: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(rows)?),
        OutputFormat::Csv => print!("{}", to_csv(rows)?),
        OutputFormat::Table => print!("{}", table()),
    }
    Ok(())
}

async fn run_email(
    command: EmailCommands,
    api: &dyn CampaignApi,
    format: OutputFormat,
    toasts: &mut Toasts,
) -> anyhow::Result<()> {
    match command {
        EmailCommands::Send { fields, recipients } => {
            let mut form = EmailForm {
                domain_name: fields.domain,
                template_name: fields.template_name,
                template_id: fields.template_id,
                recipients,
            };
            let outcome = form.submit(api).await;
            if let (Some(summary), OutputFormat::Json) = (&outcome.summary, format) {
                println!("{}", to_json(summary)?);
            }

            let mut table = EmailLogTable::new();
            if table.refresh_after_send(&outcome, api, toasts).await {
                print_rows(table.logs(), format, || table.render())?;
            }
            toasts.push(outcome.notification);
        }

        EmailCommands::Preview { fields, recipient } => {
            let form = EmailForm {
                domain_name: fields.domain,
                template_name: fields.template_name,
                template_id: fields.template_id,
                recipients: String::new(),
            };
            match form.preview(api, &recipient).await {
                Ok(preview) if format == OutputFormat::Json => println!("{}", to_json(&preview)?),
                Ok(preview) => {
                    println!("Recipient:      {}", preview.recipient);
                    println!("Deliverability: {}", preview.deliverability);
                    println!("Template:       {} ({})", preview.template.name, preview.template.id);
                    println!("From:           {}", preview.from_email);
                }
                Err(notification) => toasts.push(notification),
            }
        }

        EmailCommands::Logs { expand } => {
            let mut table = EmailLogTable::new();
            if table.refresh(api, toasts).await {
                if expand {
                    table.expand_all();
                }
                print_rows(table.logs(), format, || table.render())?;
            }
        }
    }
    Ok(())
}

async fn run_whatsapp(
    command: WhatsAppCommands,
    api: &dyn CampaignApi,
    config: &Config,
    format: OutputFormat,
    toasts: &mut Toasts,
) -> anyhow::Result<()> {
    match command {
        WhatsAppCommands::Templates => match api.whatsapp_templates().await {
            Ok(templates) => print_rows(&templates, format, || {
                let mut out = format!("{:<20} {}\n{}\n", "ID", "Name", "-".repeat(50));
                for t in &templates {
                    out.push_str(&format!("{:<20} {}\n", t.id, t.name));
                }
                out
            })?,
            Err(e) => toasts.push(Notification::from_api_error(
                &e,
                "Failed to fetch WhatsApp templates",
            )),
        },

        WhatsAppCommands::Contacts => match api.whatsapp_contacts().await {
            Ok(contacts) => print_rows(&contacts, format, || {
                let mut out = format!("{:<30} {}\n{}\n", "Name", "Phone", "-".repeat(50));
                for c in &contacts {
                    out.push_str(&format!("{:<30} {}\n", c.name, c.phone));
                }
                out
            })?,
            Err(e) => toasts.push(Notification::from_api_error(
                &e,
                "Failed to fetch WhatsApp contacts",
            )),
        },

        WhatsAppCommands::Send {
            template,
            contact,
            all_contacts,
            number,
            at,
            param_one,
            param_two,
            dry_run,
        } => {
            let mut form = WhatsAppForm::new(config.whatsapp.clone());

            match api.whatsapp_templates().await {
                Ok(templates) => form.load_templates(templates),
                Err(e) => {
                    toasts.push(Notification::from_api_error(
                        &e,
                        "Failed to fetch WhatsApp templates",
                    ));
                    return Ok(());
                }
            }
            if let Some(name) = &template {
                if !form.select_template(name) {
                    toasts.push(Notification::error(format!("Unknown template: {}", name)));
                    return Ok(());
                }
            }

            if all_contacts {
                match api.whatsapp_contacts().await {
                    Ok(contacts) => {
                        form.load_contacts(contacts);
                        form.toggle_all_contacts();
                    }
                    Err(e) => {
                        toasts.push(Notification::from_api_error(
                            &e,
                            "Failed to fetch WhatsApp contacts",
                        ));
                        return Ok(());
                    }
                }
            }
            for phone in &contact {
                if !form.selected_contacts().contains(phone) {
                    form.toggle_contact(phone);
                }
            }
            form.manual_number = number.unwrap_or_default();
            form.scheduled_time = at;
            if let Some(value) = param_one {
                form.param_one = value;
            }
            if let Some(value) = param_two {
                form.param_two = value;
            }

            if dry_run {
                match form.build_requests(Utc::now()) {
                    Ok(requests) => {
                        if format == OutputFormat::Json {
                            println!("{}", to_json(&requests)?);
                        } else {
                            println!("{:<20} {:<24} {}", "Mobile Number", "Template", "Scheduled (UTC)");
                            println!("{}", "-".repeat(70));
                            for r in &requests {
                                println!(
                                    "{:<20} {:<24} {}",
                                    r.mobile_number,
                                    r.template_name,
                                    r.scheduled_time.format("%Y-%m-%d %H:%M")
                                );
                            }
                        }
                        toasts.push(Notification::info(format!(
                            "{} message(s) planned, nothing sent",
                            requests.len()
                        )));
                    }
                    Err(e) => toasts.push(Notification::error(e.to_string())),
                }
                return Ok(());
            }

            let outcome = form.submit(api, Utc::now()).await;

            let mut table = WhatsAppLogTable::new(config.whatsapp.clone());
            if table.refresh_after_send(&outcome, api, toasts).await {
                print_rows(table.logs(), format, || table.render())?;
            }
            toasts.push(outcome.notification);
        }

        WhatsAppCommands::Logs { expand } => {
            let mut table = WhatsAppLogTable::new(config.whatsapp.clone());
            if table.refresh(api, toasts).await {
                if expand {
                    table.expand_all();
                }
                print_rows(table.logs(), format, || table.render())?;
            }
        }

        WhatsAppCommands::SendNow { id } => {
            row_action(api, config, id, RowAction::SendNow, None, toasts).await;
        }

        WhatsAppCommands::Cancel { id, reason } => {
            row_action(api, config, id, RowAction::Cancel, reason.as_deref(), toasts).await;
        }

        WhatsAppCommands::Followup { id, which } => {
            row_action(api, config, id, RowAction::FollowUp(which), None, toasts).await;
        }
    }
    Ok(())
}

/// Load the log table so the action can be checked against the row's state
async fn row_action(
    api: &dyn CampaignApi,
    config: &Config,
    id: CampaignId,
    action: RowAction,
    reason: Option<&str>,
    toasts: &mut Toasts,
) {
    let mut table = WhatsAppLogTable::new(config.whatsapp.clone());
    if table.refresh(api, toasts).await {
        table.perform(api, id, action, reason, toasts).await;
    }
}
