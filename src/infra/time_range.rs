//! Resolution of raw (possibly relative) time ranges to absolute instants.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone as _, Timelike, Utc,
};

use crate::domain::{RawTimeRange, TimeRange, TimeZone, UserProfile};

/// Time zone of `user`, or `fallback` when the profile has no preference.
pub fn get_time_zone(user: &UserProfile, fallback: TimeZone) -> TimeZone {
    user.time_zone.unwrap_or(fallback)
}

/// Resolves `raw` against the current time.
pub fn get_time_range_from_url(raw: &RawTimeRange, time_zone: TimeZone) -> TimeRange {
    resolve_time_range(raw, time_zone, Utc::now())
}

/// Resolves `raw` against `now`. Bounds that cannot be parsed fall back to
/// the default range's bound.
pub fn resolve_time_range(raw: &RawTimeRange, time_zone: TimeZone, now: DateTime<Utc>) -> TimeRange {
    let fallback = RawTimeRange::default();
    let offset = time_zone.offset_at(now);

    let from = parse_bound(&raw.from, false, offset, now)
        .or_else(|| parse_bound(&fallback.from, false, offset, now))
        .unwrap_or(now);
    let to = parse_bound(&raw.to, true, offset, now)
        .or_else(|| parse_bound(&fallback.to, true, offset, now))
        .unwrap_or(now);

    TimeRange {
        from,
        to,
        raw: raw.clone(),
    }
}

fn parse_bound(
    text: &str,
    round_up: bool,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Some(expr) = text.strip_prefix("now") {
        return apply_math(now.with_timezone(&offset), expr, round_up).map(|t| t.with_timezone(&Utc));
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return DateTime::from_timestamp_millis(text.parse().ok()?);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y%m%dT%H%M%S").ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
}

// Evaluates `[+-]N<unit>` steps and `/<unit>` rounding, left to right.
fn apply_math(
    mut time: DateTime<FixedOffset>,
    expr: &str,
    round_up: bool,
) -> Option<DateTime<FixedOffset>> {
    let mut chars = expr.chars().peekable();
    while let Some(op) = chars.next() {
        match op {
            '/' => {
                let unit = chars.next()?;
                time = round_to_unit(time, unit, round_up)?;
            }
            '+' | '-' => {
                let mut digits = String::new();
                while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(*c);
                    chars.next();
                }
                let amount: i64 = if digits.is_empty() { 1 } else { digits.parse().ok()? };
                let amount = if op == '-' { -amount } else { amount };
                time = shift(time, amount, chars.next()?)?;
            }
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    Some(time)
}

fn shift(time: DateTime<FixedOffset>, amount: i64, unit: char) -> Option<DateTime<FixedOffset>> {
    let months = |n: i64| -> Option<DateTime<FixedOffset>> {
        let m = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
        if n < 0 {
            time.checked_sub_months(m)
        } else {
            time.checked_add_months(m)
        }
    };
    match unit {
        's' => time.checked_add_signed(Duration::try_seconds(amount)?),
        'm' => time.checked_add_signed(Duration::try_minutes(amount)?),
        'h' => time.checked_add_signed(Duration::try_hours(amount)?),
        'd' => time.checked_add_signed(Duration::try_days(amount)?),
        'w' => time.checked_add_signed(Duration::try_weeks(amount)?),
        'M' => months(amount),
        'y' => months(amount.checked_mul(12)?),
        _ => None,
    }
}

fn round_to_unit(
    time: DateTime<FixedOffset>,
    unit: char,
    round_up: bool,
) -> Option<DateTime<FixedOffset>> {
    let offset = *time.offset();
    let date = time.date_naive();
    let start_of_day = |d: NaiveDate| offset.from_local_datetime(&d.and_time(NaiveTime::MIN)).single();

    let start = match unit {
        's' => offset
            .from_local_datetime(&date.and_hms_opt(time.hour(), time.minute(), time.second())?)
            .single()?,
        'm' => offset
            .from_local_datetime(&date.and_hms_opt(time.hour(), time.minute(), 0)?)
            .single()?,
        'h' => offset
            .from_local_datetime(&date.and_hms_opt(time.hour(), 0, 0)?)
            .single()?,
        'd' => start_of_day(date)?,
        'w' => start_of_day(
            date - Duration::try_days(i64::from(date.weekday().num_days_from_monday()))?,
        )?,
        'M' => start_of_day(date.with_day(1)?)?,
        'y' => start_of_day(NaiveDate::from_ymd_opt(date.year(), 1, 1)?)?,
        _ => return None,
    };

    if !round_up {
        return Some(start);
    }
    let next = shift(start, 1, unit)?;
    next.checked_sub_signed(Duration::try_milliseconds(1)?)
}
