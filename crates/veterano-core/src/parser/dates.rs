//! Publication date parser
//!
//! Dates are persisted exactly as scraped; this parser only produces the
//! calendar-date sort key. The site shows numeric dates and occasionally
//! the Spanish long form ("14 de mayo de 2024").

use chrono::NaiveDate;

const NUMERIC_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

const SPANISH_MONTHS: [(&str, u32); 12] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

/// Parse a scraped date string into a calendar date.
///
/// Returns `None` for anything unrecognized; records with unparseable
/// dates keep their text but get no guaranteed sort position.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use veterano_core::parser::parse_publication_date;
///
/// assert_eq!(
///     parse_publication_date("14/05/2024"),
///     NaiveDate::from_ymd_opt(2024, 5, 14)
/// );
/// assert_eq!(
///     parse_publication_date("14 de mayo de 2024"),
///     NaiveDate::from_ymd_opt(2024, 5, 14)
/// );
/// assert_eq!(parse_publication_date("hace 3 días"), None);
/// ```
pub fn parse_publication_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in &NUMERIC_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    parse_spanish_long_form(trimmed)
}

/// Parse "14 de mayo de 2024"-style dates.
fn parse_spanish_long_form(text: &str) -> Option<NaiveDate> {
    let re = regex_lite::Regex::new(r"(?i)(\d{1,2})\s+de\s+([a-záéíóúñ]+)\s+de\s+(\d{4})").ok()?;
    let caps = re.captures(text)?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month_name = caps.get(2)?.as_str().to_lowercase();
    let month = SPANISH_MONTHS
        .iter()
        .find(|(name, _)| *name == month_name)
        .map(|(_, number)| *number)?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_format() {
        assert_eq!(
            parse_publication_date("14/05/2024"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
        assert_eq!(
            parse_publication_date("1/1/2020"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
    }

    #[test]
    fn test_parse_dash_and_iso_formats() {
        assert_eq!(
            parse_publication_date("14-05-2024"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
        assert_eq!(
            parse_publication_date("2024-05-14"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
    }

    #[test]
    fn test_parse_spanish_long_form() {
        assert_eq!(
            parse_publication_date("14 de mayo de 2024"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
        assert_eq!(
            parse_publication_date("3 de Enero de 2021"),
            NaiveDate::from_ymd_opt(2021, 1, 3)
        );
    }

    #[test]
    fn test_parse_spanish_long_form_in_text() {
        assert_eq!(
            parse_publication_date("Publicado el 14 de mayo de 2024"),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            parse_publication_date("  14/05/2024  "),
            NaiveDate::from_ymd_opt(2024, 5, 14)
        );
    }

    #[test]
    fn test_unknown_month_rejected() {
        assert_eq!(parse_publication_date("14 de floreal de 2024"), None);
    }

    #[test]
    fn test_impossible_dates_rejected() {
        assert_eq!(parse_publication_date("31/02/2024"), None);
        assert_eq!(parse_publication_date("31 de febrero de 2024"), None);
    }

    #[test]
    fn test_free_text_rejected() {
        assert_eq!(parse_publication_date("hace 3 días"), None);
        assert_eq!(parse_publication_date("ayer"), None);
        assert_eq!(parse_publication_date(""), None);
    }
}
