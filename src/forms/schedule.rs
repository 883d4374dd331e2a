//! Scheduling policies and schedule-time input
//!
//! A WhatsApp submission becomes one send per planned time per recipient.
//! Most templates are sent once; the configured triple-schedule template is
//! sent at the chosen time and again 7 and 10 days later, with its two
//! placeholder parameters filled in.

use chrono::{DateTime, Days, Duration, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::WhatsAppConfig;
use crate::models::TemplateParameter;

/// How a single submission is expanded into scheduled sends
pub trait SchedulePolicy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Send times derived from the chosen base time, in order
    fn plan(&self, base: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, ScheduleParseError>;

    /// Template parameters carried by every planned send
    fn parameters(&self, param_one: &str, param_two: &str) -> Vec<TemplateParameter>;
}

/// One send at the chosen time, no parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSend;

impl SchedulePolicy for SingleSend {
    fn name(&self) -> &'static str {
        "single"
    }

    fn plan(&self, base: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, ScheduleParseError> {
        Ok(vec![base])
    }

    fn parameters(&self, _param_one: &str, _param_two: &str) -> Vec<TemplateParameter> {
        Vec::new()
    }
}

/// Three sends at +0, +7 and +10 days, filling placeholders `{{2}}` and `{{3}}`
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleSchedule;

impl TripleSchedule {
    pub const OFFSET_DAYS: [u64; 3] = [0, 7, 10];
    pub const PLACEHOLDERS: [&'static str; 2] = ["2", "3"];

    /// Plan with calendar days counted in `tz`, keeping the wall-clock time
    pub fn plan_in<Tz: TimeZone>(
        &self,
        base: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<Vec<DateTime<Utc>>, ScheduleParseError> {
        Self::OFFSET_DAYS
            .iter()
            .map(|days| {
                add_calendar_days(base, *days, tz).ok_or_else(|| {
                    ScheduleParseError::OutOfRange(format!("{} + {} days", base, days))
                })
            })
            .collect()
    }
}

/// Same local time `days` calendar days later
///
/// A wall-clock time skipped by a DST gap falls back to a fixed 24h-per-day
/// offset; an ambiguous one takes the earlier instant.
fn add_calendar_days<Tz: TimeZone>(
    base: DateTime<Utc>,
    days: u64,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let shifted = base
        .with_timezone(tz)
        .naive_local()
        .checked_add_days(Days::new(days))?;
    match tz.from_local_datetime(&shifted).earliest() {
        Some(local) => Some(local.with_timezone(&Utc)),
        None => base.checked_add_days(Days::new(days)),
    }
}

impl SchedulePolicy for TripleSchedule {
    fn name(&self) -> &'static str {
        "triple"
    }

    fn plan(&self, base: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, ScheduleParseError> {
        self.plan_in(base, &Local)
    }

    fn parameters(&self, param_one: &str, param_two: &str) -> Vec<TemplateParameter> {
        vec![
            TemplateParameter::new(Self::PLACEHOLDERS[0], param_one),
            TemplateParameter::new(Self::PLACEHOLDERS[1], param_two),
        ]
    }
}

/// Pick the policy for a template name
pub fn policy_for(template_name: &str, config: &WhatsAppConfig) -> Box<dyn SchedulePolicy> {
    if template_name == config.triple_schedule_template {
        Box::new(TripleSchedule)
    } else {
        Box::new(SingleSend)
    }
}

/// Schedule-time input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleParseError {
    #[error("unrecognized time \"{0}\" (use now, +30m, +2h, +3d, +1w, RFC 3339 or YYYY-MM-DDTHH:MM)")]
    Unrecognized(String),

    #[error("\"{0}\" does not exist in the local time zone")]
    NonexistentLocalTime(String),

    #[error("\"{0}\" is out of range")]
    OutOfRange(String),
}

fn relative_time_regex() -> &'static Regex {
    static RELATIVE: OnceLock<Regex> = OnceLock::new();
    // Literal pattern, checked by the relative-offset tests
    RELATIVE.get_or_init(|| Regex::new(r"^\+(\d+)\s*([mhdw])$").expect("valid relative time pattern"))
}

/// Parse a schedule time typed by the user
///
/// Accepts `now`, relative offsets (`+45m`, `+2h`, `+3d`, `+1w`), RFC 3339,
/// and date-time-local values (`2025-06-01T09:30`, seconds optional) which
/// are read in the local time zone.
pub fn parse_schedule_time(
    input: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleParseError> {
    let s = input.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Some(caps) = relative_time_regex().captures(&s.to_lowercase()) {
        let out_of_range = || ScheduleParseError::OutOfRange(s.to_string());
        let amount: i64 = caps[1].parse().map_err(|_| out_of_range())?;
        let offset = match &caps[2] {
            "m" => Duration::try_minutes(amount),
            "h" => Duration::try_hours(amount),
            "d" => Duration::try_days(amount),
            _ => Duration::try_weeks(amount),
        }
        .ok_or_else(out_of_range)?;
        return now.checked_add_signed(offset).ok_or_else(out_of_range);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| ScheduleParseError::NonexistentLocalTime(s.to_string()));
        }
    }

    Err(ScheduleParseError::Unrecognized(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate};

    /// US Eastern for 2025: EDT from Mar 9 02:00 to Nov 2 02:00 local
    #[derive(Debug, Clone, Copy)]
    struct Eastern2025;

    impl Eastern2025 {
        fn est() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn edt() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for Eastern2025 {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            Eastern2025
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let spring = Self::at(3, 9, 2);
            let fall = Self::at(11, 2, 1);
            if *local < spring {
                LocalResult::Single(Self::est())
            } else if *local < spring + Duration::hours(1) {
                LocalResult::None
            } else if *local < fall {
                LocalResult::Single(Self::edt())
            } else if *local < fall + Duration::hours(1) {
                LocalResult::Ambiguous(Self::edt(), Self::est())
            } else {
                LocalResult::Single(Self::est())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc >= Self::at(3, 9, 7) && *utc < Self::at(11, 2, 6) {
                Self::edt()
            } else {
                Self::est()
            }
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 25, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_single_send_plan() {
        assert_eq!(SingleSend.plan(base()).unwrap(), vec![base()]);
        assert!(SingleSend.parameters("a", "b").is_empty());
    }

    #[test]
    fn test_triple_schedule_plan() {
        let plan = TripleSchedule.plan_in(base(), &Utc).unwrap();
        assert_eq!(
            plan,
            vec![
                base(),
                Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 3, 7, 9, 30, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_triple_schedule_keeps_wall_clock_across_dst() {
        // Noon EST on Mar 1; the third send lands after the spring-forward
        let base = Eastern2025.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let plan = TripleSchedule
            .plan_in(base.with_timezone(&Utc), &Eastern2025)
            .unwrap();

        let local: Vec<String> = plan
            .iter()
            .map(|at| at.with_timezone(&Eastern2025).format("%m-%d %H:%M %z").to_string())
            .collect();
        assert_eq!(
            local,
            vec!["03-01 12:00 -0500", "03-08 12:00 -0500", "03-11 12:00 -0400"]
        );
        assert_eq!(plan[2], Utc.with_ymd_and_hms(2025, 3, 11, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_triple_schedule_skipped_local_time() {
        // 02:30 on Mar 9 does not exist locally; fall back to whole days
        let base = Eastern2025.with_ymd_and_hms(2025, 3, 2, 2, 30, 0).unwrap();
        let plan = TripleSchedule
            .plan_in(base.with_timezone(&Utc), &Eastern2025)
            .unwrap();
        assert_eq!(plan[1], base.with_timezone(&Utc) + Duration::days(7));
    }

    #[test]
    fn test_triple_schedule_out_of_range() {
        let plan = TripleSchedule.plan_in(DateTime::<Utc>::MAX_UTC, &Utc);
        assert!(matches!(plan, Err(ScheduleParseError::OutOfRange(_))));
    }

    #[test]
    fn test_triple_schedule_parameters() {
        let params = TripleSchedule.parameters("https://a.example", "https://b.example");
        assert_eq!(
            params,
            vec![
                TemplateParameter::new("2", "https://a.example"),
                TemplateParameter::new("3", "https://b.example"),
            ]
        );
    }

    #[test]
    fn test_policy_selection() {
        let config = WhatsAppConfig::default();
        assert_eq!(policy_for("payment112", &config).name(), "triple");
        assert_eq!(policy_for("welcome", &config).name(), "single");
        assert_eq!(policy_for("Payment112", &config).name(), "single");
    }

    #[test]
    fn test_parse_now_and_relative() {
        let now = base();
        assert_eq!(parse_schedule_time("now", now).unwrap(), now);
        assert_eq!(
            parse_schedule_time("+30m", now).unwrap(),
            now + Duration::minutes(30)
        );
        assert_eq!(parse_schedule_time("+2H", now).unwrap(), now + Duration::hours(2));
        assert_eq!(parse_schedule_time("+3d", now).unwrap(), now + Duration::days(3));
        assert_eq!(parse_schedule_time("+1w", now).unwrap(), now + Duration::weeks(1));
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_schedule_time("2025-06-01T09:30:00+05:30", base()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 1, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_datetime() {
        let parsed = parse_schedule_time("2025-06-01T09:30", base()).unwrap();
        let expected = Local
            .with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_schedule_time("tomorrow-ish", base()),
            Err(ScheduleParseError::Unrecognized(_))
        ));
        assert!(parse_schedule_time("+5y", base()).is_err());
    }

    #[test]
    fn test_parse_relative_overflow() {
        for input in ["+99999999999999w", "+999999999d", "+99999999999999999999m"] {
            assert!(
                matches!(
                    parse_schedule_time(input, base()),
                    Err(ScheduleParseError::OutOfRange(_))
                ),
                "{} should be out of range",
                input
            );
        }
    }
}
