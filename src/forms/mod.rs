//! Campaign Forms
//!
//! Local state for the two "send campaign" forms. Each form validates that
//! its required fields are present, builds the request payload, submits it
//! through [`CampaignApi`](crate::api::CampaignApi) and reports the outcome
//! as a notification.
//!
//! ## Rules
//!
//! - Only presence of required fields is checked here; the backend owns
//!   every other validation.
//! - A successful submission resets the form.
//! - WhatsApp submissions fan out over all recipients and over the planned
//!   send times of the selected [`SchedulePolicy`].

mod email;
pub mod schedule;
mod whatsapp;

pub use email::{EmailForm, EmailSubmitOutcome};
pub use schedule::{
    parse_schedule_time, policy_for, ScheduleParseError, SchedulePolicy, SingleSend,
    TripleSchedule,
};
pub use whatsapp::{WhatsAppForm, WhatsAppSubmitOutcome};

use thiserror::Error;

/// Client-side submission errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please select a contact or enter a number")]
    NoRecipients,

    #[error("Invalid scheduled time: {0}")]
    InvalidScheduleTime(#[from] ScheduleParseError),
}
