use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the date formats found in frontmatter.
///
/// RFC 3339 values keep their offset and are converted to UTC. Naive values
/// (`2024-06-01`, `2024-06-01 10:00:00.000`, `2024-06-01T10:00`) are taken as UTC.
pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.(\d{1,9}))?)?Z?$"
        ).unwrap();
    }

    let buf = buf.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);
    let opt_u32 = |idx: usize| match caps.get(idx) {
        Some(m) => to_u32(m.as_str()),
        None => Ok(0),
    };

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let h: u32 = opt_u32(4)?;
    let mn: u32 = opt_u32(5)?;
    let s: u32 = opt_u32(6)?;
    let ms: u32 = match caps.get(7) {
        // Only millisecond precision is kept
        Some(frac) => {
            let digits: String = frac.as_str().chars().chain("000".chars()).take(3).collect();
            to_u32(&digits)?
        }
        None => 0,
    };

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Invalid date {}", buf));
    };
    let Some(time) = NaiveTime::from_hms_milli_opt(h, mn, s, ms) else {
        return Err(format!("Invalid time {}", buf));
    };

    Ok(NaiveDateTime::new(date, time).and_utc())
}

/// ISO-8601 in UTC with milliseconds, e.g. `2024-06-01T00:00:00.000Z`
pub fn format_iso(date_time: &DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_date(date_time: &DateTime<Utc>) -> String {
    date_time.format("%Y-%m-%d").to_string()
}

/// Resolves `path` against the site base URL. Absolute http(s) URLs are returned as they are.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base_url = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(format_iso(&date_time), "2017-09-10T10:42:32.123Z");

        let date_time = parse_date_time("2017-09-10 10:42:32").unwrap();
        assert_eq!(format_iso(&date_time), "2017-09-10T10:42:32.000Z");

        let date_time = parse_date_time("2024-01-01").unwrap();
        assert_eq!(format_iso(&date_time), "2024-01-01T00:00:00.000Z");
        assert_eq!(format_date(&date_time), "2024-01-01");

        let date_time = parse_date_time("2024-6-1T08:30").unwrap();
        assert_eq!(format_iso(&date_time), "2024-06-01T08:30:00.000Z");
    }

    #[test]
    fn test_parse_rfc3339() {
        let date_time = parse_date_time("2024-06-01T10:00:00+02:00").unwrap();
        assert_eq!(format_iso(&date_time), "2024-06-01T08:00:00.000Z");

        let date_time = parse_date_time("2024-06-01T10:00:00.5Z").unwrap();
        assert_eq!(format_iso(&date_time), "2024-06-01T10:00:00.500Z");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date_time("not-a-date").is_err());
        assert!(parse_date_time("").is_err());
        assert!(parse_date_time("2024-13-01").is_err());
        assert!(parse_date_time("2024-02-30").is_err());
        assert!(parse_date_time("2024-01-01 25:00:00").is_err());
    }

    #[test]
    fn test_absolute_url() {
        let base = "https://s.se";
        assert_eq!(absolute_url(base, "/img/a.png"), "https://s.se/img/a.png");
        assert_eq!(absolute_url(base, "img/a.png"), "https://s.se/img/a.png");
        assert_eq!(absolute_url("https://s.se/", "/img/a.png"), "https://s.se/img/a.png");
        assert_eq!(absolute_url(base, "https://cdn.se/a.png"), "https://cdn.se/a.png");
    }
}
