use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

/// Error type for user-typed due dates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DueParseError {
    #[error("unrecognized date: {0:?} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)")]
    Unrecognized(String),
    #[error("{0:?} does not exist in the local time zone")]
    Nonexistent(String),
}

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Parse the due-date field in the local time zone. Empty input means no due date.
pub fn parse_due_input(input: &str) -> Result<Option<DateTime<Utc>>, DueParseError> {
    parse_due_input_in(input, &Local)
}

/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DD HH:MM` and `YYYY-MM-DDTHH:MM`.
pub fn parse_due_input_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, DueParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| DueParseError::Unrecognized(input.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .ok_or_else(|| DueParseError::Nonexistent(input.to_string()))
}

/// Full date for the focused task, e.g. `Mar 5, 2024`, in local time
pub fn format_full_date(due: DateTime<Utc>) -> String {
    format_full_date_in(due, &Local)
}

pub fn format_full_date_in<Tz: TimeZone>(due: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    due.with_timezone(tz).format("%b %-d, %Y").to_string()
}

/// Human distance between `due` and `now` with a direction suffix:
/// `in 3 days`, `about 2 hours ago`, `less than a minute ago`.
pub fn format_distance_to_now(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance = format_distance(due, now);
    if due > now {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

/// Unsuffixed distance between two instants, in date-fns' wording.
/// Calendar months are counted in local time.
pub fn format_distance(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    format_distance_in(a, b, &Local)
}

pub fn format_distance_in<Tz: TimeZone>(
    a: DateTime<Utc>,
    b: DateTime<Utc>,
    tz: &Tz,
) -> String {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    let seconds = (later - earlier).num_seconds();
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        return if minutes == 0 {
            "less than a minute".into()
        } else {
            "1 minute".into()
        };
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "about 1 hour".into();
    }
    if minutes < MINUTES_IN_DAY {
        return plural("about", round_div(minutes, 60), "hour");
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".into();
    }
    if minutes < MINUTES_IN_MONTH {
        return plural("", round_div(minutes, MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return plural("about", round_div(minutes, MINUTES_IN_MONTH), "month");
    }

    let months = months_between(&earlier.with_timezone(tz), &later.with_timezone(tz));
    if months < 12 {
        let nearest = round_div(minutes, MINUTES_IN_MONTH).max(1);
        return plural("", nearest, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => plural("about", years, "year"),
        3..=8 => plural("over", years, "year"),
        _ => plural("almost", years + 1, "year"),
    }
}

fn plural(prefix: &str, n: i64, unit: &str) -> String {
    let s = if n == 1 { "" } else { "s" };
    if prefix.is_empty() {
        format!("{} {}{}", n, unit, s)
    } else {
        format!("{} {} {}{}", prefix, n, unit, s)
    }
}

/// Round-half-up integer division for non-negative values
fn round_div(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

/// Whole calendar months from `earlier` to `later`, on their own wall clock
fn months_between<Tz: TimeZone>(earlier: &DateTime<Tz>, later: &DateTime<Tz>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);
    let later_rest = (later.day(), later.num_seconds_from_midnight());
    let earlier_rest = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_rest < earlier_rest {
        months -= 1;
    }
    months
}
