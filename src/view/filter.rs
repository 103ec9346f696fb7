use crate::api::model::Analysis;
use crate::core::error::{Error, Result};
use chrono::{Local, NaiveDate, TimeZone};

/// Format accepted for the history date filter
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the filter text; empty text means no filter
pub fn parse_filter_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, FILTER_DATE_FORMAT)
        .map(Some)
        .map_err(|_| Error::InvalidInput(format!("Fecha inválida {raw:?}, usa AAAA-MM-DD")))
}

/// Entries created on `day` in time zone `tz`, original order kept.
/// `None` keeps every entry.
pub fn filter_by_day<'a, Tz: TimeZone>(
    history: &'a [Analysis],
    day: Option<NaiveDate>,
    tz: &Tz,
) -> Vec<&'a Analysis> {
    let Some(day) = day else {
        return history.iter().collect();
    };

    history
        .iter()
        .filter(|analysis| {
            analysis
                .created_at
                .map(|ts| ts.with_timezone(tz).date_naive() == day)
                .unwrap_or(false)
        })
        .collect()
}

/// `filter_by_day` over the local time zone, taking the raw filter text
pub fn filter_by_local_day<'a>(history: &'a [Analysis], raw: &str) -> Result<Vec<&'a Analysis>> {
    let day = parse_filter_date(raw)?;
    Ok(filter_by_day(history, day, &Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn created(keyword: &str, ts: Option<&str>) -> Analysis {
        serde_json::from_value(serde_json::json!({
            "keyword": keyword,
            "createdAt": ts,
        }))
        .unwrap()
    }

    fn history() -> Vec<Analysis> {
        vec![
            created("a", Some("2024-03-05T08:00:00Z")),
            created("b", Some("2024-03-06T01:30:00Z")),
            created("c", Some("2024-03-05T23:59:59Z")),
            created("d", None),
            created("e", Some("2025-03-05T12:00:00Z")),
        ]
    }

    fn keywords(entries: &[&Analysis]) -> Vec<String> {
        entries.iter().map(|a| a.keyword.clone()).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let history = history();
        let all = filter_by_day(&history, None, &Utc);
        assert_eq!(all.len(), history.len());
        assert!(all.iter().zip(history.iter()).all(|(a, b)| std::ptr::eq(*a, b)));

        let all = filter_by_local_day(&history, "   ").unwrap();
        assert_eq!(keywords(&all), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_filter_compares_calendar_day_not_timestamp() {
        let history = history();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5);
        let matched = filter_by_day(&history, day, &Utc);
        assert_eq!(keywords(&matched), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_uses_given_time_zone() {
        let history = history();
        // UTC-03:00: "b" (01:30Z on the 6th) falls on the 5th, "c" stays on the 5th
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5);
        let matched = filter_by_day(&history, day, &tz);
        assert_eq!(keywords(&matched), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_with_no_matches() {
        let history = history();
        let day = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(filter_by_day(&history, day, &Utc).is_empty());
        assert!(filter_by_day(&[], day, &Utc).is_empty());
    }

    #[test]
    fn test_parse_filter_date() {
        assert_eq!(parse_filter_date("").unwrap(), None);
        assert_eq!(
            parse_filter_date("2024-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert!(parse_filter_date("05/03/2024").is_err());
        assert!(parse_filter_date("2024-02-30").is_err());
    }

    #[test]
    fn test_bad_filter_message_has_no_prefix() {
        let err = parse_filter_date("5 mar").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.user_message(), "Fecha inválida \"5 mar\", usa AAAA-MM-DD");
    }
}
