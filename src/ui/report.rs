//! Plain-text output for the non-interactive subcommands.

use crate::api::model::{Analysis, Sentiment};
use crate::view::format::{
    date_label, format_created_at, format_news_count, format_percentage, format_score,
    raw_percentage,
};
use crate::view::sentiment::{bucket_summaries, dominant_sentiment};
use std::fmt::Write;

/// Full breakdown of one analysis
pub fn analysis_report(analysis: &Analysis) -> String {
    let mut out = String::new();
    let keyword = if analysis.keyword.is_empty() {
        "Sin palabra clave"
    } else {
        &analysis.keyword
    };

    let _ = writeln!(out, "Análisis de \"{}\"", keyword);
    let _ = writeln!(
        out,
        "{} analizadas - {}",
        format_news_count(analysis.total_count()),
        date_label(&analysis.date)
    );
    let _ = writeln!(out);

    let buckets = bucket_summaries(analysis);
    for bucket in &buckets {
        let _ = writeln!(
            out,
            "  {} {:<10} {:>7}  ({})",
            bucket.sentiment.icon(),
            bucket.label(),
            format_percentage(bucket.percentage),
            format_news_count(bucket.news_count as u64)
        );
    }

    for bucket in buckets.iter().filter(|b| !b.top_news.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top 5 Noticias {}", bucket.label());
        for (rank, item) in bucket.top_news.iter().enumerate() {
            let _ = writeln!(out, "  #{} [{}] {}", rank + 1, item.sentiment.item_label(), item.title);
            if !item.snippet.is_empty() {
                let _ = writeln!(out, "     {}", item.snippet);
            }
            let _ = writeln!(out, "     {}  {}", format_score(item.score), item.link);
        }
    }

    out
}

/// One line block per history entry
pub fn history_report(entries: &[&Analysis]) -> String {
    if entries.is_empty() {
        return "No hay análisis previos disponibles\n".to_string();
    }

    let mut out = String::new();
    for analysis in entries {
        let dominant = dominant_sentiment(analysis);
        let _ = writeln!(out, "{} {}  [{}]", dominant.icon(), analysis.keyword, analysis.id);
        let _ = writeln!(
            out,
            "   {}  {}",
            format_news_count(analysis.total_count()),
            format_created_at(analysis.created_at.as_ref())
        );
        let _ = writeln!(
            out,
            "   {}: {}  {}: {}  {}: {}",
            Sentiment::Positive.short_label(),
            raw_percentage(analysis.percentages.get(Sentiment::Positive)),
            Sentiment::Negative.short_label(),
            raw_percentage(analysis.percentages.get(Sentiment::Negative)),
            Sentiment::Neutral.short_label(),
            raw_percentage(analysis.percentages.get(Sentiment::Neutral)),
        );
    }
    out
}
