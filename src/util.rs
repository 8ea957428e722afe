use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Minutes in a day. `1440` is a valid end-of-day boundary for shift ends.
pub const DAY_MINUTES: u16 = 1440;

/// Format minutes-since-midnight as a zero-padded 24h clock.
///
/// Example: 540 → "09:00". The day-end boundary formats as "24:00".
pub fn format_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:(\d{1,2}):(\d{2})|(\d{2})(\d{2}))$").unwrap())
}

/// Parse clock text into minutes-since-midnight.
///
/// Accepts `"HH:MM"`, `"H:MM"`, and bare 4-digit `"HHMM"`. Returns `None`
/// for anything else, for minutes ≥ 60, and for times past 24:00.
pub fn parse_clock(text: &str) -> Option<u16> {
    let caps = clock_re().captures(text.trim())?;
    let (hours, minutes) = match (caps.get(1), caps.get(2)) {
        (Some(h), Some(m)) => (h.as_str().parse::<u16>().ok()?, m.as_str().parse::<u16>().ok()?),
        _ => {
            let h = caps.get(3)?.as_str().parse::<u16>().ok()?;
            let m = caps.get(4)?.as_str().parse::<u16>().ok()?;
            (h, m)
        }
    };
    if minutes > 59 {
        return None;
    }
    let total = hours * 60 + minutes;
    if total > DAY_MINUTES {
        return None;
    }
    Some(total)
}

/// Parse an ISO `YYYY-MM-DD` date, rejecting anything else.
pub fn parse_iso_date(text: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Today in the server's local timezone, as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Write `content` to `path` via a uniquely named temp file in the same
/// directory, renamed into place, so a reader never observes a half-written
/// file and concurrent writers never share a temp path.
pub fn atomic_write_str(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(540), "09:00");
        assert_eq!(format_clock(755), "12:35");
    }

    #[test]
    fn test_format_clock_day_end() {
        assert_eq!(format_clock(1440), "24:00");
    }

    #[test]
    fn test_parse_clock_colon_forms() {
        assert_eq!(parse_clock("09:00"), Some(540));
        assert_eq!(parse_clock("9:00"), Some(540));
        assert_eq!(parse_clock("23:59"), Some(1439));
        assert_eq!(parse_clock("24:00"), Some(1440));
        assert_eq!(parse_clock(" 12:30 "), Some(750));
    }

    #[test]
    fn test_parse_clock_four_digit_form() {
        assert_eq!(parse_clock("0930"), Some(570));
        assert_eq!(parse_clock("1415"), Some(855));
        assert_eq!(parse_clock("0000"), Some(0));
    }

    #[test]
    fn test_parse_clock_rejects_garbage() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("9"), None);
        assert_eq!(parse_clock("930"), None);
        assert_eq!(parse_clock("12:75"), None);
        assert_eq!(parse_clock("1275"), None);
        assert_eq!(parse_clock("25:00"), None);
        assert_eq!(parse_clock("24:01"), None);
        assert_eq!(parse_clock("12:3a"), None);
        assert_eq!(parse_clock("noon"), None);
    }

    #[test]
    fn test_parse_clock_format_clock_agree() {
        for minutes in [0u16, 15, 540, 600, 1439, 1440] {
            assert_eq!(parse_clock(&format_clock(minutes)), Some(minutes));
        }
    }

    #[test]
    fn test_parse_iso_date() {
        assert!(parse_iso_date("2026-08-25").is_some());
        assert!(parse_iso_date("2026-2-5").is_none());
        assert!(parse_iso_date("08/25/2026").is_none());
        assert!(parse_iso_date("2026-13-01").is_none());
        assert!(parse_iso_date("").is_none());
    }

    #[test]
    fn test_atomic_write_str_replaces_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");

        atomic_write_str(&path, "first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        atomic_write_str(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_atomic_write_str_keeps_unrelated_siblings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        let sibling = dir.path().join("out.tmp");
        std::fs::write(&sibling, "unrelated").unwrap();

        atomic_write_str(&path, "payload").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "payload");
        assert_eq!(std::fs::read_to_string(&sibling).unwrap(), "unrelated");
        // Only the target and the untouched sibling remain.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
