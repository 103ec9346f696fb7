use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// "5 mar 2024, 14:30" in time zone `tz`
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String {
    let local = ts.with_timezone(tz);
    format!(
        "{} {} {}, {:02}:{:02}",
        local.day(),
        MONTHS_ES[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// Creation time in local time, or a placeholder
pub fn format_created_at(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(|ts| format_timestamp(ts, &Local))
        .unwrap_or_else(|| "Fecha no disponible".to_string())
}

/// Percentage with one decimal ("60.0%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Score with three decimals
pub fn format_score(score: f64) -> String {
    format!("Score: {:.3}", score)
}

/// "10 noticias"
pub fn format_news_count(count: u64) -> String {
    format!("{} noticias", count)
}

/// Raw percentage text from the service, "0%" when missing
pub fn raw_percentage(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("0%")
}

/// Date label of an analysis, or a placeholder
pub fn date_label(date: &str) -> &str {
    if date.trim().is_empty() {
        "Fecha no disponible"
    } else {
        date
    }
}

/// Cut text to at most `max` characters, ending with "..." when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
