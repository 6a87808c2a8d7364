use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

const NATURAL_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
];

/// Reads a calendar date. A `-` means ISO (`YYYY-MM-DD` or a full ISO
/// date-time, whose date part is kept), a `/` means `DD/MM/YYYY`, anything
/// else is tried against a few spelled-out month forms.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();

    if date.contains('-') {
        iso_date(date)
    } else if date.contains('/') {
        let mut parts = date.split('/');
        let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);

        iso_date(&format!("{}-{}-{}", year, month, day))
    } else {
        NATURAL_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
    }
}

fn iso_date(date: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Some(instant.with_timezone(&Local).date_naive());
    }

    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|instant| instant.date())
}

/// Combines a date with an optional `HH:mm` time into a boundary instant.
/// `None` means the input could not be read.
pub fn parse_boundary(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let midnight = parse_date(date)?.and_hms_opt(0, 0, 0)?;

    match time.filter(|time| !time.is_empty()) {
        None => Some(midnight),
        Some(time) => {
            let (hours, minutes) = parse_clock(time)?;

            // out of range values roll over into neighbouring days
            midnight.checked_add_signed(
                Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes)),
            )
        }
    }
}

fn parse_clock(time: &str) -> Option<(i32, i32)> {
    let mut parts = time.split(':');
    let hours = leading_number(parts.next()?)?;
    let minutes = leading_number(parts.next()?)?;

    Some((hours, minutes))
}

fn leading_number(part: &str) -> Option<i32> {
    let part = part.trim_start();
    let (negative, digits) = match part.as_bytes().first() {
        Some(b'-') => (true, &part[1..]),
        Some(b'+') => (false, &part[1..]),
        _ => (false, part),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let value: i32 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}
