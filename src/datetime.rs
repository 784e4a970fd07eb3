//! Date and time helpers built on chrono
//!
//! Calendar checks come in two forms: a pure `*_at` form taking an explicit
//! reference date (what tests use) and a thin wrapper that supplies "now".

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback format used by [`time_ago`] for anything older than a week
pub const DEFAULT_TIME_AGO_FORMAT: &str = "DD MMM YY at HH:mm";

static FORMAT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"YYYY|MM|DD|HH|mm|ss").unwrap());

/// Zero-pad a time component to two digits.
pub fn pad2(value: u32) -> String {
    format!("{value:02}")
}

/// `hh:mm` or `hh:mm:ss` rendering of a time.
pub fn time_string<T: Timelike>(time: &T, with_seconds: bool) -> String {
    let mut out = format!("{}:{}", pad2(time.hour()), pad2(time.minute()));
    if with_seconds {
        out.push(':');
        out.push_str(&pad2(time.second()));
    }
    out
}

/// UTC offset in hours, positive when the zone is behind UTC.
pub fn timezone_offset_hours<Tz: TimeZone>(datetime: &DateTime<Tz>) -> f64 {
    -f64::from(datetime.offset().fix().local_minus_utc()) / 3600.0
}

/// Whether `a` is strictly before `b`.
pub fn is_before<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a < b
}

/// Whether `a` is strictly after `b`.
pub fn is_after<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a > b
}

/// Whether the instant lies in the future.
pub fn is_future(datetime: &DateTime<Utc>) -> bool {
    *datetime > Utc::now()
}

/// Whether the instant lies in the past.
pub fn is_past(datetime: &DateTime<Utc>) -> bool {
    *datetime < Utc::now()
}

pub fn is_today_at(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

pub fn is_today(date: NaiveDate) -> bool {
    is_today_at(date, Local::now().date_naive())
}

pub fn is_yesterday_at(date: NaiveDate, today: NaiveDate) -> bool {
    date == today - chrono::Duration::days(1)
}

pub fn is_yesterday(date: NaiveDate) -> bool {
    is_yesterday_at(date, Local::now().date_naive())
}

pub fn is_tomorrow_at(date: NaiveDate, today: NaiveDate) -> bool {
    date == today + chrono::Duration::days(1)
}

pub fn is_tomorrow(date: NaiveDate) -> bool {
    is_tomorrow_at(date, Local::now().date_naive())
}

/// Same ISO week (and week-year) as the reference date.
pub fn is_this_week_at(date: NaiveDate, reference: NaiveDate) -> bool {
    date.iso_week() == reference.iso_week()
}

pub fn is_this_week(date: NaiveDate) -> bool {
    is_this_week_at(date, Local::now().date_naive())
}

pub fn is_this_month_at(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

pub fn is_this_month(date: NaiveDate) -> bool {
    is_this_month_at(date, Local::now().date_naive())
}

pub fn is_this_year_at(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year()
}

pub fn is_this_year(date: NaiveDate) -> bool {
    is_this_year_at(date, Local::now().date_naive())
}

/// Render a datetime through a token format string.
///
/// Tokens: `YYYY` `YY` `MMMM` `MMM` `MM` `DD` `D` `HH` `mm` `ss`. Every
/// occurrence of a token is replaced; other characters pass through.
pub fn format_date(datetime: &NaiveDateTime, format: &str) -> String {
    let tokens: [(&str, String); 10] = [
        ("YYYY", datetime.year().to_string()),
        ("MMMM", datetime.format("%B").to_string()),
        ("MMM", datetime.format("%b").to_string()),
        ("YY", format!("{:02}", datetime.year().rem_euclid(100))),
        ("MM", pad2(datetime.month())),
        ("DD", pad2(datetime.day())),
        ("HH", pad2(datetime.hour())),
        ("mm", pad2(datetime.minute())),
        ("ss", pad2(datetime.second())),
        ("D", datetime.day().to_string()),
    ];

    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    while !rest.is_empty() {
        if let Some((token, value)) = tokens.iter().find(|(token, _)| rest.starts_with(token)) {
            out.push_str(value);
            rest = &rest[token.len()..];
        } else if let Some(c) = rest.chars().next() {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Human-friendly description of how long ago `datetime` was, relative to
/// `reference`. Falls back to [`format_date`] with `format` beyond a week.
pub fn time_ago(datetime: &NaiveDateTime, reference: &NaiveDateTime, format: &str) -> String {
    let seconds_ago = (*reference - *datetime).num_milliseconds() as f64 / 1000.0;
    let minutes_ago = seconds_ago / 60.0;
    let hours_ago = minutes_ago / 60.0;

    if seconds_ago < 10.0 {
        return "Just now".to_string();
    }
    if seconds_ago < 60.0 {
        return "A few seconds ago".to_string();
    }
    if minutes_ago < 60.0 {
        let unit = if minutes_ago < 2.0 { "minute" } else { "minutes" };
        return format!("{} {unit} ago", minutes_ago.round());
    }
    if hours_ago < 12.0 {
        let unit = if hours_ago < 2.0 { "hour" } else { "hours" };
        return format!("{} {unit} ago", hours_ago.round());
    }

    let date = datetime.date();
    let today = reference.date();
    if is_today_at(date, today) {
        return format!("Today at {}", time_string(datetime, false));
    }
    if is_yesterday_at(date, today) {
        return format!("Yesterday at {}", time_string(datetime, false));
    }
    if is_this_week_at(date, today) {
        return format!("{} at {}", datetime.format("%A"), time_string(datetime, false));
    }
    format_date(datetime, format)
}

/// Whether a format string contains at least one known token.
pub fn validate_date_format(format: &str) -> bool {
    FORMAT_TOKEN.is_match(format)
}

/// Number of days in the given month (1-12). `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

/// The Monday of the week containing `date`.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
